use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::Ledger;
use crate::ui::app::{App, InputMode};
use crate::ui::pager::total_pages;
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) const EMPTY_MESSAGE: &str = "No expenses recorded yet.";

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style(false))
        .title(Span::styled(
            format!(" Expense History ({}) ", ledger.len()),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if ledger.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(EMPTY_MESSAGE, theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press e to add an expense or t to top up",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    render_table(f, chunks[0], app, ledger);
    render_page_controls(f, chunks[1], app, ledger.len());
}

fn render_table(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let header = Row::new(
        ["Date", "Description", "Amount"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::title_style())),
    );

    let show_cursor = app.input_mode != InputMode::Form;
    let rows: Vec<Row> = app
        .pager
        .slice(ledger.records())
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let amount_style = if record.is_credit() {
                theme::credit_style()
            } else {
                theme::debit_style()
            };
            let style = if show_cursor && i == app.cursor {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(record.calendar_date(&chrono::Local)),
                Cell::from(truncate(&record.description, 40)),
                Cell::from(Span::styled(record.display_amount(), amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(14),
    ];
    f.render_widget(Table::new(rows, widths).header(header), area);
}

fn render_page_controls(f: &mut Frame, area: Rect, app: &App, count: usize) {
    let control = |label: &'static str, enabled: bool| {
        Span::styled(
            label,
            if enabled {
                theme::normal_style()
            } else {
                theme::disabled_style()
            },
        )
    };

    let page_info = format!("Page {} of {}", app.pager.page(), total_pages(count));
    let side = 12u16;
    let pad = (area.width as usize)
        .saturating_sub(page_info.len() + 2 * side as usize)
        / 2;

    let line = Line::from(vec![
        control("◀ h Previous", app.pager.has_prev()),
        Span::raw(" ".repeat(pad)),
        Span::styled(page_info, theme::dim_style()),
        Span::raw(" ".repeat(pad)),
        control("Next l ▶", app.pager.has_next(count)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
