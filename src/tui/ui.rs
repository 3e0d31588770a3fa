use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, Tab};
use crate::models::{RefreshStatus, SummaryStatus};

const PREVIEW_CHARS: usize = 600;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Refresh status
            Constraint::Length(1), // Key hints / messages
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);
    match app.tab {
        Tab::News => render_news(frame, app, chunks[1]),
        Tab::Saved => render_saved(frame, app, chunks[1]),
        Tab::Summary => render_summary(frame, app, chunks[1]),
    }
    render_status(frame, app, chunks[2]);
    render_hints(frame, app, chunks[3]);

    if app.keyword_input_active {
        render_keyword_input(frame, app);
    }

    if app.show_help {
        render_help(frame);
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let auto = if app.auto_refresh_running() {
        format!("auto {}m", app.auto_refresh_minutes())
    } else {
        "auto off".to_string()
    };
    let title = format!(" News Watch [{}] [{auto}] ", app.config.keywords.join(", "));

    let tabs = Tabs::new(vec![
        " News ".to_string(),
        format!(" Saved ({}) ", app.saved.len()),
        " Summary ".to_string(),
    ])
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    )
    .select(app.tab.index())
    .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    frame.render_widget(tabs, area);
}

fn render_news(frame: &mut Frame, app: &App, area: Rect) {
    let mut items: Vec<ListItem> = Vec::new();
    let mut selected_row = None;
    let mut index = 0;

    if let Some(outcome) = &app.outcome {
        for group in &outcome.groups {
            let header = format!("── {} ({}) ", group.keyword, group.items.len());
            items.push(ListItem::new(Line::from(Span::styled(
                header,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))));

            if group.items.is_empty() {
                items.push(ListItem::new(Span::styled(
                    "   no recent articles",
                    Style::default().fg(Color::DarkGray),
                )));
            }

            for item in &group.items {
                if index == app.news_index {
                    selected_row = Some(items.len());
                }
                index += 1;

                let marker = if item.is_new { "NEW " } else { "    " };
                let title_style = if item.is_new {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                items.push(ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Green)),
                    Span::styled(
                        format!("[{}] ", item.published_display),
                        Style::default().fg(Color::Blue),
                    ),
                    Span::styled(item.title.as_str(), title_style),
                ])));
            }
        }
    } else {
        items.push(ListItem::new(Span::styled(
            "Press r to fetch news",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(selected_row);
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_saved(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .saved
        .iter()
        .map(|saved| {
            let mark = if app.marked.contains(&saved.id) { "[x] " } else { "[ ] " };
            ListItem::new(Line::from(vec![
                Span::styled(mark, Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{} ", saved.saved_at.format("%Y-%m-%d %H:%M")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(format!("[{}] ", saved.keyword), Style::default().fg(Color::Blue)),
                Span::styled(saved.title.as_str(), Style::default().fg(Color::White)),
            ]))
        })
        .collect();

    let title = if app.marked.is_empty() {
        " Saved News ".to_string()
    } else {
        format!(" Saved News ({} marked) ", app.marked.len())
    };

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !app.saved.is_empty() {
        state.select(Some(app.saved_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let header = match &app.summary_item {
        Some(item) => {
            let link = app
                .summary_article
                .as_ref()
                .map(|a| a.resolved_url.as_str())
                .unwrap_or(item.link.as_str());
            let mut lines = vec![Line::from(Span::styled(
                item.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ))];
            lines.push(Line::from(Span::styled(link, Style::default().fg(Color::Blue))));
            if let Some(image) = app.summary_article.as_ref().and_then(|a| a.top_image.as_deref()) {
                lines.push(Line::from(Span::styled(
                    format!("image: {image}"),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines
        }
        None => vec![Line::from("No article selected")],
    };
    frame.render_widget(
        Paragraph::new(header).wrap(Wrap { trim: true }),
        chunks[0],
    );

    let content = match app.summary_status {
        SummaryStatus::NotRequested => {
            "Select an article on the News tab and press Enter to summarize it.".to_string()
        }
        SummaryStatus::Generating => "Downloading the article and generating a summary...".to_string(),
        SummaryStatus::Generated => {
            let summary = app
                .summary
                .as_ref()
                .map(|s| s.content.clone())
                .unwrap_or_else(|| "No summary available".to_string());
            match &app.summary_article {
                Some(article) => {
                    let preview: String = article.text.chars().take(PREVIEW_CHARS).collect();
                    format!("{summary}\n\n── Article ──\n{preview}")
                }
                None => summary,
            }
        }
        SummaryStatus::TooShort => {
            let body = app
                .summary_article
                .as_ref()
                .map(|a| a.text.as_str())
                .unwrap_or_default();
            format!("The article body is too short to summarize.\n\n{body}")
        }
        SummaryStatus::Failed => match &app.summary_error {
            Some((message, detail)) => format!("{message}\n\n{detail}"),
            None => "Summarization failed".to_string(),
        },
        SummaryStatus::NoApiKey => "Gemini API key not configured.\n\nAdd it to:\n~/.config/news-watch/config.toml\n\nExample:\ngemini_api_key = \"...\"".to_string(),
    };

    let title = match (&app.summary, app.summary_status) {
        (Some(summary), SummaryStatus::Generated) => format!(
            " Summary ({}, {}) ",
            summary.model_version,
            summary.generated_at.format("%H:%M:%S")
        ),
        _ => " Summary ".to_string(),
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, chunks[1]);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let (text, color) = if app.is_refreshing {
        ("Refreshing...".to_string(), Color::Yellow)
    } else {
        match &app.outcome {
            Some(outcome) => {
                let color = match outcome.status() {
                    RefreshStatus::NewItems(_) => Color::Green,
                    RefreshStatus::NoNewItems => Color::White,
                    RefreshStatus::NothingFound => Color::DarkGray,
                };
                (outcome.status_line(), color)
            }
            None => ("Not refreshed yet".to_string(), Color::DarkGray),
        }
    };

    frame.render_widget(Paragraph::new(text).style(Style::default().fg(color)), area);
}

fn render_hints(frame: &mut Frame, app: &App, area: Rect) {
    let text = match &app.message {
        Some(message) => message.clone(),
        None => match app.tab {
            Tab::News => "Tab:switch  j/k:nav  Enter:summarize  s:save  r:refresh  ?:help  q:quit",
            Tab::Saved => "Tab:switch  j/k:nav  Space:mark  d:delete  x:export  o:open  q:quit",
            Tab::Summary => "Tab:switch  o:open  ?:help  q:quit",
        }
        .to_string(),
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn render_keyword_input(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 20, frame.area());

    let block = Block::default()
        .title(" Keywords (comma separated) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let input_text = format!("> {}_", app.keyword_input);
    let paragraph = Paragraph::new(input_text).style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, inner);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(50, 70, frame.area());

    let help_text = [
        "",
        " Navigation:",
        "   Tab      Switch tab",
        "   j / ↓    Move down",
        "   k / ↑    Move up",
        "",
        " News:",
        "   Enter    Summarize article",
        "   s        Save article",
        "   r        Refresh now",
        "   a        Toggle auto refresh",
        "   + / -    Change refresh interval",
        "   e        Edit keywords",
        "   R        Reset seen-title history",
        "",
        " Saved:",
        "   Space    Mark / unmark",
        "   d        Delete marked (or selected)",
        "   x        Export to JSON",
        "",
        " General:",
        "   o        Open in browser",
        "   ?        Toggle this help",
        "   q        Quit",
        "",
        " Press any key to close",
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text.join("\n"))
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
