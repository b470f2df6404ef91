// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Titles, footer and item styles used by widget rendering.

fn list_view_title(list: &TodoList) -> String {
    let done = list.items().iter().filter(|item| item.completed()).count();
    format!("─ {} ({done}/{}) ", list.title(), list.len())
}

fn input_view_title(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Browse => "─ New todo ",
        InputMode::Insert => "─ New todo (Enter to add, Esc to cancel) ",
    }
}

fn input_border_style(mode: InputMode) -> Style {
    match mode {
        InputMode::Browse => Style::default(),
        InputMode::Insert => Style::default().fg(FOCUS_COLOR),
    }
}

fn item_line(item: &TodoItem) -> Line<'static> {
    let (marker, style) = if item.completed() {
        ("[x] ", Style::default().fg(DONE_COLOR).add_modifier(Modifier::CROSSED_OUT))
    } else {
        ("[ ] ", Style::default())
    };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(FOOTER_KEY_COLOR)),
        Span::styled(item.title().to_owned(), style),
    ])
}

fn sync_color(sync: SyncKind) -> Color {
    match sync {
        SyncKind::Fallback => Color::DarkGray,
        SyncKind::Pending => Color::Yellow,
        SyncKind::Synced => FOCUS_COLOR,
    }
}

fn footer_line(app: &App, sync: SyncKind) -> Line<'static> {
    let mut spans = vec![
        Span::styled("● ", Style::default().fg(sync_color(sync))),
        Span::styled(sync.to_string(), Style::default().fg(FOOTER_LABEL_COLOR)),
    ];

    match app.mode {
        InputMode::Browse => {
            push_footer_entry(&mut spans, "add", "a");
            push_footer_entry(&mut spans, "toggle", "space");
            push_footer_entry(&mut spans, "delete", "d");
            push_footer_entry(&mut spans, "quit", "q");
        }
        InputMode::Insert => {
            push_footer_entry(&mut spans, "add", "enter");
            push_footer_entry(&mut spans, "cancel", "esc");
        }
    }

    if let Some(toast) = app.active_toast() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::styled(toast.to_owned(), Style::default().fg(Color::White)));
    }
    Line::from(spans)
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, key: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(
        key.to_owned(),
        Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD),
    ));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}
