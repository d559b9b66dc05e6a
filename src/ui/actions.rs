//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,

    // 日期导航
    PrevDay,
    NextDay,
    JumpToday,

    // 经文条目
    ToggleExpand,
    ToggleRead,

    // 触发特定功能
    StartPickDate,
    StartPreferences,
    ToggleDarkMode, // 导航栏式快捷切换，绕过偏好对话框

    // 表单/通用交互
    Cancel,      // Esc
    Submit,      // Enter / Space
    Input(char), // 输入字符
    DeleteChar,  // Backspace
}
