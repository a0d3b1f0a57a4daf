use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse user-typed money. Accepts an optional leading `$` and thousands
/// separators; anything else that is not a plain decimal is rejected.
pub(crate) fn parse_amount(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let cleaned = rest.strip_prefix('$').unwrap_or(rest).replace(',', "");
    if cleaned.is_empty() || cleaned.starts_with(['-', '+']) {
        return None;
    }
    let value = Decimal::from_str(&cleaned).ok()?;
    Some(if negative { -value } else { value })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormKind {
    InitialBalance,
    Expense,
    TopUp,
}

impl FormKind {
    pub(crate) fn title(&self) -> &'static str {
        match self {
            Self::InitialBalance => "Set Initial Balance",
            Self::Expense => "Add Expense",
            Self::TopUp => "Top Up Cash",
        }
    }

    pub(crate) fn fields(&self) -> &'static [Field] {
        match self {
            Self::Expense => &[Field::Description, Field::Amount],
            Self::InitialBalance | Self::TopUp => &[Field::Amount],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Description,
    Amount,
}

impl Field {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::Amount => "Amount",
        }
    }
}

/// A validated form, ready to become a ledger mutation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Submission {
    InitialBalance(Decimal),
    Expense { description: String, amount: Decimal },
    TopUp(Decimal),
}

/// Text buffers for one of the three input surfaces.
#[derive(Debug, Clone)]
pub(crate) struct Form {
    pub(crate) kind: FormKind,
    pub(crate) description: String,
    pub(crate) amount: String,
    pub(crate) focus: Field,
    /// Set after a rejected submit so the offending field can be highlighted.
    pub(crate) attempted: bool,
}

impl Form {
    pub(crate) fn new(kind: FormKind) -> Self {
        Self {
            kind,
            description: String::new(),
            amount: String::new(),
            focus: kind.fields()[0],
            attempted: false,
        }
    }

    pub(crate) fn value(&self, field: Field) -> &str {
        match field {
            Field::Description => &self.description,
            Field::Amount => &self.amount,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Description => &mut self.description,
            Field::Amount => &mut self.amount,
        }
    }

    pub(crate) fn push(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub(crate) fn pop(&mut self) {
        self.focused_mut().pop();
    }

    /// Cycle focus to the next field (wrapping).
    pub(crate) fn next_field(&mut self) {
        let fields = self.kind.fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + 1) % fields.len()];
    }

    /// Whether `field` currently holds an acceptable value.
    pub(crate) fn is_valid(&self, field: Field) -> bool {
        match field {
            Field::Description => !self.description.trim().is_empty(),
            Field::Amount => parse_amount(&self.amount).is_some(),
        }
    }

    /// First field that would block a submit.
    pub(crate) fn first_invalid(&self) -> Option<Field> {
        self.kind.fields().iter().copied().find(|f| !self.is_valid(*f))
    }

    pub(crate) fn submit(&self) -> Option<Submission> {
        let amount = parse_amount(&self.amount)?;
        match self.kind {
            FormKind::InitialBalance => Some(Submission::InitialBalance(amount)),
            FormKind::TopUp => Some(Submission::TopUp(amount)),
            FormKind::Expense => {
                let description = self.description.trim();
                if description.is_empty() {
                    return None;
                }
                Some(Submission::Expense {
                    description: description.to_string(),
                    amount,
                })
            }
        }
    }
}
