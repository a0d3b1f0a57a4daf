use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::forms::{Field, Form};
use crate::ui::theme;

const LABEL_WIDTH: usize = 13;

/// Rows needed to draw `form`, borders included.
pub(crate) fn height(form: Option<&Form>) -> u16 {
    match form {
        Some(form) => form.kind.fields().len() as u16 + 3,
        None => 1,
    }
}

pub(crate) fn render(f: &mut Frame, area: Rect, form: Option<&Form>) {
    let Some(form) = form else {
        render_hints(f, area);
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style(true))
        .title(Span::styled(format!(" {} ", form.kind.title()), theme::title_style()));
    let inner = block.inner(area);

    let mut lines: Vec<Line> = form
        .kind
        .fields()
        .iter()
        .map(|field| field_line(form, *field))
        .collect();
    lines.push(Line::from(Span::styled(
        " Enter submit | Tab next field | Esc cancel",
        theme::dim_style(),
    )));

    f.render_widget(Paragraph::new(lines).block(block), area);

    if let Some(row) = form.kind.fields().iter().position(|fld| *fld == form.focus) {
        let col = 1 + LABEL_WIDTH + form.value(form.focus).chars().count();
        f.set_cursor_position((inner.x + col as u16, inner.y + row as u16));
    }
}

fn field_line(form: &Form, field: Field) -> Line<'_> {
    let focused = form.focus == field;
    let label_style = if form.attempted && !form.is_valid(field) {
        theme::invalid_style()
    } else if focused {
        theme::title_style()
    } else {
        theme::dim_style()
    };
    Line::from(vec![
        Span::styled(format!(" {:<width$}", field.label(), width = LABEL_WIDTH), label_style),
        Span::styled(form.value(field), theme::input_style(focused)),
    ])
}

fn render_hints(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" e", theme::section_style()),
        Span::styled(" add expense  ", theme::dim_style()),
        Span::styled("t", theme::section_style()),
        Span::styled(" top up  ", theme::dim_style()),
        Span::styled("b", theme::section_style()),
        Span::styled(" set initial balance  ", theme::dim_style()),
        Span::styled("x", theme::section_style()),
        Span::styled(" export log", theme::dim_style()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
