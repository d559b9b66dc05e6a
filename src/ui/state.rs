//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use std::collections::HashSet;

use crate::config::Config;
use crate::models::{DateCursor, FixedPlan, ReadingId, ReadingItem, ReadingSet};
use crate::theme::{ColorSchemeSource, ThemeResolver};

/// 应用状态
pub struct App {
    pub cursor: DateCursor,
    pub readings: ReadingSet,
    pub expanded: HashSet<ReadingId>,
    pub selected_index: usize,
    pub theme: ThemeResolver<Box<dyn ColorSchemeSource>>,
    pub expand_on_launch: bool,
    pub mode: AppMode,
    pub input_buffer: String,
    pub message: Option<String>,
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    PickingDate,
    Preferences(PrefField),
}

/// 偏好对话框中的字段
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrefField {
    ExpandOnLaunch,
    Theme,
}

impl App {
    /// 创建新的应用实例
    pub fn new(config: Config, source: Box<dyn ColorSchemeSource>) -> Self {
        let cursor = DateCursor::today();
        let readings = ReadingSet::new(Box::new(FixedPlan::sample()));

        // 偏好决定初始展开状态，之后用户手动开合不受其约束
        let expanded: HashSet<ReadingId> = if config.expand_readings {
            readings
                .list(cursor.date())
                .iter()
                .map(|item| item.id)
                .collect()
        } else {
            HashSet::new()
        };

        Self {
            cursor,
            readings,
            expanded,
            selected_index: 0,
            theme: ThemeResolver::new(source, config.theme),
            expand_on_launch: config.expand_readings,
            mode: AppMode::Normal,
            input_buffer: String::new(),
            message: None,
        }
    }

    /// 当天目录
    pub fn catalog(&self) -> &[ReadingItem] {
        self.readings.list(self.cursor.date())
    }

    /// 当前选中的经文条目
    pub fn selected_item(&self) -> Option<&ReadingItem> {
        self.catalog().get(self.selected_index)
    }

    pub fn is_expanded(&self, id: ReadingId) -> bool {
        self.expanded.contains(&id)
    }

    /// 每个 tick 轮询一次系统配色信号
    pub fn tick(&mut self) {
        if self.theme.poll() {
            self.message = Some("主题已跟随系统切换".to_string());
        }
    }
}
