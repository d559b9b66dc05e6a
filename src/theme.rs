//! 主题解析
//!
//! 三值偏好（浅色/深色/跟随系统）对系统配色信号的解析：
//! 偏好为 system 时持有一个订阅对象并跟随信号，
//! 偏好切换为明确的浅色/深色时订阅被丢弃，信号不再起作用

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// 用户的主题偏好
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

/// 解析后实际生效的主题，永远是浅色或深色
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectiveTheme {
    Light,
    Dark,
}

impl EffectiveTheme {
    fn from_signal(is_dark: bool) -> Self {
        if is_dark { Self::Dark } else { Self::Light }
    }
}

/// 系统配色信号来源
pub trait ColorSchemeSource {
    fn is_dark(&self) -> bool;
}

impl ColorSchemeSource for Box<dyn ColorSchemeSource> {
    fn is_dark(&self) -> bool {
        (**self).is_dark()
    }
}

/// 操作系统的配色信号（dark-light 探测）
pub struct OsColorScheme;

impl ColorSchemeSource for OsColorScheme {
    fn is_dark(&self) -> bool {
        matches!(dark_light::detect(), dark_light::Mode::Dark)
    }
}

/// 对系统信号的订阅
///
/// 只在偏好为 System 期间存在；记录最近一次看到的信号值
/// 避免重复触发
#[derive(Debug)]
struct Subscription {
    last_dark: bool,
}

/// 主题解析器
///
/// 持有偏好与解析结果；偏好为 System 时通过订阅跟随信号，
/// 否则信号送达也不改变结果
pub struct ThemeResolver<S: ColorSchemeSource> {
    source: S,
    preference: ThemePreference,
    effective: EffectiveTheme,
    subscription: Option<Subscription>,
    on_change: Option<Box<dyn FnMut(EffectiveTheme)>>,
}

impl<S: ColorSchemeSource> ThemeResolver<S> {
    /// 创建解析器；偏好为 System 时立即查询一次信号作为种子
    pub fn new(source: S, preference: ThemePreference) -> Self {
        let (effective, subscription) = match preference {
            ThemePreference::Light => (EffectiveTheme::Light, None),
            ThemePreference::Dark => (EffectiveTheme::Dark, None),
            ThemePreference::System => {
                let is_dark = source.is_dark();
                (
                    EffectiveTheme::from_signal(is_dark),
                    Some(Subscription { last_dark: is_dark }),
                )
            }
        };
        Self {
            source,
            preference,
            effective,
            subscription,
            on_change: None,
        }
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    pub fn effective(&self) -> EffectiveTheme {
        self.effective
    }

    /// 注册生效主题变化的通知钩子（渲染层用）
    #[allow(dead_code)]
    pub fn on_change(&mut self, hook: impl FnMut(EffectiveTheme) + 'static) {
        self.on_change = Some(Box::new(hook));
    }

    /// 设置偏好并重新解析
    ///
    /// 进入 System 时查询一次信号并建立订阅，
    /// 离开 System 时丢弃订阅
    pub fn set_preference(&mut self, preference: ThemePreference) {
        self.preference = preference;
        match preference {
            ThemePreference::Light => {
                self.subscription = None;
                self.apply(EffectiveTheme::Light);
            }
            ThemePreference::Dark => {
                self.subscription = None;
                self.apply(EffectiveTheme::Dark);
            }
            ThemePreference::System => {
                let is_dark = self.source.is_dark();
                self.subscription = Some(Subscription { last_dark: is_dark });
                self.apply(EffectiveTheme::from_signal(is_dark));
            }
        }
    }

    /// 接收系统信号
    ///
    /// 任何时候送达都合法；没有订阅（偏好非 System）时是空操作
    pub fn handle_signal(&mut self, is_dark: bool) -> bool {
        let Some(subscription) = &mut self.subscription else {
            return false;
        };
        if subscription.last_dark == is_dark {
            return false;
        }
        subscription.last_dark = is_dark;
        self.apply(EffectiveTheme::from_signal(is_dark))
    }

    /// 轮询信号来源，返回生效主题是否变化
    pub fn poll(&mut self) -> bool {
        if self.subscription.is_none() {
            return false;
        }
        let is_dark = self.source.is_dark();
        self.handle_signal(is_dark)
    }

    fn apply(&mut self, effective: EffectiveTheme) -> bool {
        if self.effective == effective {
            return false;
        }
        self.effective = effective;
        if let Some(hook) = &mut self.on_change {
            hook(effective);
        }
        true
    }
}

/// 界面配色，由生效主题决定
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub title: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub highlight: Color,
    pub done: Color,
    pub dialog: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: EffectiveTheme) -> Self {
        match theme {
            EffectiveTheme::Dark => Self {
                title: Color::Cyan,
                text: Color::White,
                muted: Color::Gray,
                border: Color::DarkGray,
                highlight: Color::Yellow,
                done: Color::Green,
                dialog: Color::Cyan,
                error: Color::Red,
            },
            EffectiveTheme::Light => Self {
                title: Color::Blue,
                text: Color::Black,
                muted: Color::DarkGray,
                border: Color::Gray,
                highlight: Color::Magenta,
                done: Color::Rgb(0, 128, 0),
                dialog: Color::Blue,
                error: Color::Red,
            },
        }
    }
}
