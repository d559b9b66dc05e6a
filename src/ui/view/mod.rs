//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::state::{App, AppMode, PrefField};
use crate::theme::{Palette, ThemePreference};
use components::{render_dialog_framework, render_input_widget};
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let palette = Palette::for_theme(app.theme.effective());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Length(3), // 日期栏
            Constraint::Min(10),   // 经文列表
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0], &palette);
    render_date_bar(frame, app, chunks[1], &palette);
    render_readings(frame, app, chunks[2], &palette);
    render_help(frame, app, chunks[3], &palette);

    // 渲染弹窗
    match &app.mode {
        AppMode::PickingDate => render_date_dialog(frame, app, &palette),
        AppMode::Preferences(field) => render_preferences_dialog(frame, app, *field, &palette),
        AppMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let theme_label = match app.theme.preference() {
        ThemePreference::Light => "☀ 浅色",
        ThemePreference::Dark => "🌙 深色",
        ThemePreference::System => "跟随系统",
    };

    let title = Paragraph::new(format!("📖 每日灵修 · 麦琴读经计划  [{}]", theme_label))
        .style(
            Style::default()
                .fg(palette.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_date_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let date = app.cursor.date();
    let today_mark = if date == Local::now().date_naive() {
        "（今天）"
    } else {
        ""
    };
    let content = format!(
        "◀ h    {} {}{}    l ▶    已读 {}/{}",
        date.format("%Y-%m-%d"),
        date.format("%A"),
        today_mark,
        app.readings.read_count(date),
        app.catalog().len()
    );

    let bar = Paragraph::new(content)
        .style(Style::default().fg(palette.text))
        .block(Block::default().title("日期").borders(Borders::ALL));
    frame.render_widget(bar, area);
}

fn render_readings(frame: &mut Frame, app: &mut App, area: Rect, palette: &Palette) {
    let items: Vec<ListItem> = app
        .catalog()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let expanded = app.is_expanded(item.id);
            let marker = if expanded { "▾ " } else { "▸ " };

            let (badge, badge_color) = if app.readings.is_read(item.id) {
                ("[✓ 已读]", palette.done)
            } else {
                ("[未读]", palette.muted)
            };

            let header_style = if i == app.selected_index {
                Style::default()
                    .fg(palette.highlight)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(palette.text)
            };

            let mut lines = vec![Line::from(vec![
                Span::styled(format!("{}{}  ", marker, item.title), header_style),
                Span::styled(badge, Style::default().fg(badge_color)),
            ])];

            if expanded {
                lines.push(Line::from(Span::styled(
                    format!("    {}", item.body),
                    Style::default().fg(palette.muted),
                )));
            }

            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title("读经")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border)),
    );

    let mut state = ListState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let help_text = match &app.mode {
        AppMode::Normal => {
            "[h/l] 切换日期  [j/k] 选择  [空格] 展开  [x] 已读  [g] 跳转  [o] 今天  [t] 主题  [p] 偏好  [q] 退出"
        }
        AppMode::PickingDate => "输入日期 (YYYY-MM-DD) 后按 [Enter] 跳转  [Esc] 取消",
        AppMode::Preferences(_) => "[j/k] 选择字段  [Enter] 切换  [Esc] 关闭",
    };

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(palette.muted))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_date_dialog(frame: &mut Frame, app: &App, palette: &Palette) {
    let area = centered_rect(50, 25, frame.area());
    let inner = render_dialog_framework(frame, area, "跳转到日期", palette);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(inner);

    render_input_widget(
        frame,
        chunks[0],
        "日期 (YYYY-MM-DD)",
        &app.input_buffer,
        true,
        palette,
    );

    // 格式错误的提示直接显示在对话框里
    let hint = match app.message.as_deref() {
        Some(message) => Paragraph::new(message).style(Style::default().fg(palette.error)),
        None => Paragraph::new("按 Enter 跳转，Esc 取消").style(Style::default().fg(palette.muted)),
    };
    frame.render_widget(hint, chunks[1]);
}

fn render_preferences_dialog(frame: &mut Frame, app: &App, field: PrefField, palette: &Palette) {
    let area = centered_rect(50, 30, frame.area());
    let inner = render_dialog_framework(frame, area, "偏好设置", palette);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    let expand_label = format!(
        "启动时展开经文: {}",
        if app.expand_on_launch { "开" } else { "关" }
    );
    let theme_label = format!(
        "主题: {}",
        match app.theme.preference() {
            ThemePreference::Light => "浅色",
            ThemePreference::Dark => "深色",
            ThemePreference::System => "跟随系统",
        }
    );

    render_pref_row(
        frame,
        chunks[0],
        &expand_label,
        field == PrefField::ExpandOnLaunch,
        palette,
    );
    render_pref_row(
        frame,
        chunks[1],
        &theme_label,
        field == PrefField::Theme,
        palette,
    );

    let hint =
        Paragraph::new("j/k 选择字段，Enter 切换，Esc 关闭").style(Style::default().fg(palette.muted));
    frame.render_widget(hint, chunks[2]);
}

fn render_pref_row(frame: &mut Frame, area: Rect, label: &str, focused: bool, palette: &Palette) {
    let style = if focused {
        Style::default()
            .fg(palette.highlight)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(palette.text)
    };
    frame.render_widget(Paragraph::new(label).style(style), area);
}
