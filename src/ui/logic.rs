//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和各种业务处理方法

use chrono::NaiveDate;

use super::actions::Action;
use super::state::{App, AppMode, PrefField};
use crate::models::DateCursor;
use crate::theme::{EffectiveTheme, ThemePreference};

impl App {
    /// 核心逻辑分发
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::PrevDay => self.shift_date(-1),
            Action::NextDay => self.shift_date(1),
            Action::JumpToday => self.jump_today(),

            Action::ToggleExpand => self.toggle_expand(),
            Action::ToggleRead => self.toggle_read(),

            Action::StartPickDate => self.start_pick_date(),
            Action::StartPreferences => self.start_preferences(),
            Action::ToggleDarkMode => self.toggle_dark_mode(),

            Action::Cancel => self.cancel(),

            Action::Submit => match &self.mode {
                AppMode::PickingDate => self.confirm_pick_date(),
                AppMode::Preferences(field) => {
                    let field = *field;
                    self.apply_preference(field);
                }
                AppMode::Normal => {}
            },

            Action::Input(c) => {
                if self.mode == AppMode::PickingDate {
                    self.input_buffer.push(c);
                }
            }

            Action::DeleteChar => {
                if self.mode == AppMode::PickingDate {
                    self.input_buffer.pop();
                }
            }
        }
        false
    }

    // ============ 导航相关 ============

    /// 向上移动选择；偏好对话框中切换字段
    pub fn move_up(&mut self) {
        if let AppMode::Preferences(field) = &self.mode {
            self.mode = AppMode::Preferences(other_field(*field));
            return;
        }
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// 向下移动选择；偏好对话框中切换字段
    pub fn move_down(&mut self) {
        if let AppMode::Preferences(field) = &self.mode {
            self.mode = AppMode::Preferences(other_field(*field));
            return;
        }
        if self.selected_index + 1 < self.catalog().len() {
            self.selected_index += 1;
        }
    }

    // ============ 日期导航相关 ============

    /// 相对步进 ±N 天
    pub fn shift_date(&mut self, delta_days: i64) {
        self.cursor.shift(delta_days);
        self.message = None;
    }

    /// 回到今天
    pub fn jump_today(&mut self) {
        self.cursor = DateCursor::today();
        self.message = Some("已回到今天".to_string());
    }

    // ============ 经文条目相关 ============

    /// 展开/收起当前选中的经文
    pub fn toggle_expand(&mut self) {
        if let Some(item) = self.selected_item() {
            let id = item.id;
            if !self.expanded.remove(&id) {
                self.expanded.insert(id);
            }
        }
    }

    /// 标记当前选中的经文为已读/未读
    pub fn toggle_read(&mut self) {
        if let Some(item) = self.selected_item() {
            let id = item.id;
            let date = self.cursor.date();
            self.readings.toggle_read(date, id);
            self.message = Some(if self.readings.is_read(id) {
                "已标记为已读".to_string()
            } else {
                "已标记为未读".to_string()
            });
        }
    }

    // ============ 日期跳转相关 ============

    /// 打开日期跳转对话框，预填当前日期
    pub fn start_pick_date(&mut self) {
        self.mode = AppMode::PickingDate;
        self.input_buffer = self.cursor.date().format("%Y-%m-%d").to_string();
        self.message = None;
    }

    /// 确认跳转；格式无效时留在对话框并提示
    pub fn confirm_pick_date(&mut self) {
        match NaiveDate::parse_from_str(&self.input_buffer, "%Y-%m-%d") {
            Ok(date) => {
                self.cursor.jump(date);
                self.mode = AppMode::Normal;
                self.input_buffer.clear();
                self.message = Some(format!("已跳转到 {}", date.format("%Y-%m-%d")));
            }
            Err(_) => {
                self.message = Some("日期格式无效，应为 YYYY-MM-DD".to_string());
            }
        }
    }

    // ============ 偏好设置相关 ============

    /// 打开偏好对话框
    pub fn start_preferences(&mut self) {
        self.mode = AppMode::Preferences(PrefField::ExpandOnLaunch);
    }

    /// 切换当前偏好字段的值
    ///
    /// 启动展开偏好只影响下次启动的初始状态，
    /// 当前会话里已手动开合的面板不受影响
    pub fn apply_preference(&mut self, field: PrefField) {
        match field {
            PrefField::ExpandOnLaunch => {
                self.expand_on_launch = !self.expand_on_launch;
            }
            PrefField::Theme => {
                let next = match self.theme.preference() {
                    ThemePreference::Light => ThemePreference::Dark,
                    ThemePreference::Dark => ThemePreference::System,
                    ThemePreference::System => ThemePreference::Light,
                };
                self.theme.set_preference(next);
            }
        }
    }

    // ============ 主题相关 ============

    /// 快捷键在浅色/深色之间直接切换（不经过偏好对话框）
    pub fn toggle_dark_mode(&mut self) {
        let next = match self.theme.effective() {
            EffectiveTheme::Dark => ThemePreference::Light,
            EffectiveTheme::Light => ThemePreference::Dark,
        };
        self.theme.set_preference(next);
    }

    // ============ 通用操作 ============

    /// 取消当前操作
    pub fn cancel(&mut self) {
        self.mode = AppMode::Normal;
        self.input_buffer.clear();
        self.message = None;
    }
}

fn other_field(field: PrefField) -> PrefField {
    match field {
        PrefField::ExpandOnLaunch => PrefField::Theme,
        PrefField::Theme => PrefField::ExpandOnLaunch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::theme::ColorSchemeSource;
    use chrono::Duration;

    struct DarkSource;

    impl ColorSchemeSource for DarkSource {
        fn is_dark(&self) -> bool {
            true
        }
    }

    fn test_app() -> App {
        App::new(Config::default(), Box::new(DarkSource))
    }

    #[test]
    fn test_date_navigation_actions() {
        let mut app = test_app();
        let start = app.cursor.date();

        app.dispatch(Action::NextDay);
        assert_eq!(app.cursor.date(), start + Duration::days(1));

        app.dispatch(Action::PrevDay);
        app.dispatch(Action::PrevDay);
        assert_eq!(app.cursor.date(), start - Duration::days(1));

        app.dispatch(Action::JumpToday);
        assert_eq!(app.cursor.date(), start);
    }

    #[test]
    fn test_toggle_read_action() {
        let mut app = test_app();
        let id = app.selected_item().unwrap().id;

        app.dispatch(Action::ToggleRead);
        assert!(app.readings.is_read(id));

        app.dispatch(Action::ToggleRead);
        assert!(!app.readings.is_read(id));
    }

    #[test]
    fn test_toggle_expand_action() {
        let mut app = test_app();
        let id = app.selected_item().unwrap().id;

        assert!(!app.is_expanded(id));
        app.dispatch(Action::ToggleExpand);
        assert!(app.is_expanded(id));
        app.dispatch(Action::ToggleExpand);
        assert!(!app.is_expanded(id));
    }

    #[test]
    fn test_expand_on_launch_seeds_all() {
        let config = Config {
            expand_readings: true,
            ..Config::default()
        };
        let app = App::new(config, Box::new(DarkSource));
        for item in app.catalog() {
            assert!(app.is_expanded(item.id));
        }
    }

    #[test]
    fn test_selection_stays_in_catalog() {
        let mut app = test_app();
        let len = app.catalog().len();

        for _ in 0..20 {
            app.dispatch(Action::MoveSelectionDown);
        }
        assert_eq!(app.selected_index, len - 1);

        for _ in 0..20 {
            app.dispatch(Action::MoveSelectionUp);
        }
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_pick_date_flow() {
        let mut app = test_app();
        app.dispatch(Action::StartPickDate);
        assert_eq!(app.mode, AppMode::PickingDate);

        app.input_buffer = "2027-01-02".to_string();
        app.dispatch(Action::Submit);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(
            app.cursor.date(),
            NaiveDate::from_ymd_opt(2027, 1, 2).unwrap()
        );
    }

    #[test]
    fn test_pick_date_invalid_keeps_dialog() {
        let mut app = test_app();
        let start = app.cursor.date();

        app.dispatch(Action::StartPickDate);
        app.input_buffer = "not-a-date".to_string();
        app.dispatch(Action::Submit);

        assert_eq!(app.mode, AppMode::PickingDate);
        assert_eq!(app.cursor.date(), start);
        assert!(app.message.is_some());
    }

    #[test]
    fn test_preferences_cycle_theme() {
        let mut app = test_app();
        app.dispatch(Action::StartPreferences);
        // 切到主题字段
        app.dispatch(Action::MoveSelectionDown);
        assert_eq!(app.mode, AppMode::Preferences(PrefField::Theme));

        // system -> light -> dark -> system
        assert_eq!(app.theme.preference(), ThemePreference::System);
        app.dispatch(Action::Submit);
        assert_eq!(app.theme.preference(), ThemePreference::Light);
        app.dispatch(Action::Submit);
        assert_eq!(app.theme.preference(), ThemePreference::Dark);
        app.dispatch(Action::Submit);
        assert_eq!(app.theme.preference(), ThemePreference::System);

        app.dispatch(Action::Cancel);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_preferences_toggle_expand_on_launch() {
        let mut app = test_app();
        app.dispatch(Action::StartPreferences);
        assert!(!app.expand_on_launch);
        app.dispatch(Action::Submit);
        assert!(app.expand_on_launch);
        // 当前会话的展开状态不被追溯修改
        assert!(app.expanded.is_empty());
    }

    #[test]
    fn test_quick_theme_toggle() {
        let mut app = test_app();
        // DarkSource + system 偏好 => 深色
        assert_eq!(app.theme.effective(), EffectiveTheme::Dark);

        app.dispatch(Action::ToggleDarkMode);
        assert_eq!(app.theme.preference(), ThemePreference::Light);
        assert_eq!(app.theme.effective(), EffectiveTheme::Light);

        app.dispatch(Action::ToggleDarkMode);
        assert_eq!(app.theme.effective(), EffectiveTheme::Dark);
    }

    #[test]
    fn test_quit_action() {
        let mut app = test_app();
        assert!(app.dispatch(Action::Quit));
        assert!(!app.dispatch(Action::NextDay));
    }
}
