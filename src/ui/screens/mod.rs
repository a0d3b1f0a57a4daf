pub(crate) mod forms;
pub(crate) mod history;
