use ratatui::{
    prelude::*,
    widgets::{
        Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap,
    },
};
use sawm_core::TimingTable;

use crate::app::{App, Focus, Notice, Screen};

const ACCENT: Color = Color::Yellow;

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    // Title / header
    let year = app.service.settings().year;
    let header = Paragraph::new(format!(
        "Ramadan {year} Calendar – Sehri & Iftar timings via {}",
        app.service.source().name
    ))
    .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("sawm"));
    frame.render_widget(header, *header_area);

    // Main screen
    match app.screen {
        Screen::LocalitySelect => draw_locality_select(frame, app, *content_area),
        Screen::Timetable => draw_timetable(frame, app, *content_area),
        Screen::Duas => draw_duas(frame, app, *content_area),
    }

    // Status bar
    let nav_hint = match app.screen {
        Screen::LocalitySelect => {
            "↑/↓ move · Tab switch list · Enter get timings · d duas · q/Ctrl-C quit"
        }
        Screen::Timetable => "↑/↓ scroll · r reload · Esc/←/b back · d duas · q/Ctrl-C quit",
        Screen::Duas => {
            "↑/↓ move · Enter/Space expand · PgUp/PgDn scroll · Esc/←/b/d back · q/Ctrl-C quit"
        }
    };

    let status_text = if app.is_loading {
        format!("Loading… · {nav_hint}")
    } else if let Some(notice) = &app.notice {
        format!("{} · {nav_hint}", notice.message())
    } else {
        nav_hint.to_owned()
    };

    let status_style = match (&app.notice, app.is_loading) {
        (_, true) | (Some(Notice::NoData(_)), false) => Style::default().fg(Color::Yellow),
        (Some(Notice::Error(_)), false) => Style::default().fg(Color::Red),
        (None, false) => Style::default(),
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_locality_select(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [city_area, country_area] = chunks else {
        return;
    };

    let catalog = app.service.catalog();
    draw_picker(
        frame,
        *city_area,
        "City",
        &catalog.cities,
        app.city_index,
        app.focus == Focus::City,
    );
    draw_picker(
        frame,
        *country_area,
        "Country",
        &catalog.countries,
        app.country_index,
        app.focus == Focus::Country,
    );
}

fn draw_picker(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    names: &[String],
    selected: usize,
    focused: bool,
) {
    let items = names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let prefix = if idx == selected { "> " } else { "  " };
            ListItem::new(format!("{prefix}{name}"))
        })
        .collect::<Vec<ListItem<'_>>>();

    let border_style = if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!("{title} (↑/↓, Enter to get timings)")),
        )
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));

    let mut state = ListState::default();
    if !names.is_empty() {
        state.select(Some(selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_timetable(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let locality = app
        .requested
        .as_ref()
        .map_or_else(|| "<locality>".to_owned(), ToString::to_string);
    let year = app.service.settings().year;
    let title = format!("Ramadan {year} Sehri & Iftar Timings – {locality} (Esc/←/b to go back)");

    if app.is_loading {
        let paragraph = Paragraph::new("Loading timings…")
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    // Failures never show a table, not even a stale one
    let Some(table) = app.table.as_ref() else {
        let (text, color) = match &app.notice {
            Some(Notice::NoData(message)) => (format!("⚠ {message}"), Color::Yellow),
            Some(Notice::Error(message)) => (message.clone(), Color::Red),
            None => ("Press Enter on the selection screen to load timings.".to_owned(), Color::Reset),
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(color))
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let column_widths = [
        Constraint::Length(5),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let mut state = TableState::default();
    if !table.is_empty() {
        state.select(Some(app.row_index));
    }

    frame.render_stateful_widget(timetable_widget(table, title, column_widths), area, &mut state);
}

fn timetable_widget(table: &TimingTable, title: String, widths: [Constraint; 4]) -> Table<'_> {
    let rows = table.iter().enumerate().map(|(idx, row)| {
        Row::new(vec![
            Cell::from((idx + 1).to_string()),
            Cell::from(row.date.as_str()),
            Cell::from(row.start_label()),
            Cell::from(row.end_label()),
        ])
        .style(Style::default().fg(ACCENT))
    });

    let mut header = vec!["#"];
    header.extend(TimingTable::HEADERS);

    Table::new(rows, widths)
        .header(Row::new(header).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .column_spacing(2)
}

fn draw_duas(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let mut lines = Vec::new();

    for (idx, group) in app.service.dua_groups().iter().enumerate() {
        let open = app.expanded.get(idx).copied().unwrap_or_default();
        let marker = if open { "▾" } else { "▸" };
        let mut style = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
        if idx == app.dua_index {
            style = style.add_modifier(Modifier::REVERSED);
        }
        lines.push(Line::styled(format!("{marker} ✨ {} ✨", group.title), style));

        if open {
            for dua in group.duas {
                lines.push(Line::from(""));
                lines.push(Line::styled(
                    format!("   {}", dua.title),
                    Style::default().add_modifier(Modifier::UNDERLINED),
                ));
                lines.push(Line::styled(
                    format!("   {}", dua.arabic),
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                ));
                lines.push(Line::styled(
                    format!("   ♪ {}", dua.audio_url),
                    Style::default().fg(Color::Cyan),
                ));
            }
        }
        lines.push(Line::from(""));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Duas (Enter/Space to expand, PgUp/PgDn to scroll)");
    let inner = block.inner(area);

    let max_scroll = wrapped_rows(&lines, inner.width).saturating_sub(inner.height);
    app.dua_scroll_max.set(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.dua_scroll.min(max_scroll), 0));
    frame.render_widget(paragraph, area);
}

/// Rows the lines occupy once wrapped to `width` columns.
fn wrapped_rows(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}
