mod config;
mod models;
mod theme;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use crate::config::{config_path, load_config};
use crate::theme::OsColorScheme;
use crate::ui::{App, render};

/// 系统配色信号的轮询间隔
const TICK_INTERVAL: Duration = Duration::from_millis(500);

fn main() -> io::Result<()> {
    // 启动偏好 (~/.config/manna/config.toml)
    let config = load_config(&config_path()?)?;

    // 创建应用状态
    let mut app = App::new(config, Box::new(OsColorScheme));

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        // 超时醒来轮询系统配色，保证没有按键时主题也能跟随
        if crossterm::event::poll(TICK_INTERVAL)? {
            if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
                if key.kind == crossterm::event::KeyEventKind::Press {
                    if ui::handle_key_event(app, key.code)? {
                        break;
                    }
                }
            }
        } else {
            app.tick();
        }
    }
    Ok(())
}
