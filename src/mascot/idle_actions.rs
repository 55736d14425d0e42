//! Idle Actions: random animations when the character is bored.

use serde::{Deserialize, Serialize};

use super::interface::RandomSource;
use super::mood::Mood;

pub const GREETING_MESSAGE: &str = "你好！我是 Murphy 小助手~";
pub const RESTORE_MESSAGE: &str = "我回来啦！👋";

/// One entry of the idle table: which mood to play, for how long, and an
/// optional bubble line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdleAction {
    pub mood: Mood,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl IdleAction {
    pub fn new(mood: Mood, duration_ms: u64, message: Option<&str>) -> Self {
        Self {
            mood,
            duration_ms,
            message: message.map(str::to_string),
        }
    }
}

/// The stock idle table. Order is significant: selection is by index.
pub fn default_idle_actions() -> Vec<IdleAction> {
    vec![
        IdleAction::new(Mood::Sleep, 5000, Some("zzZ... 💤")),
        IdleAction::new(Mood::LookAround, 3000, Some("🤔 在看什么呢...")),
        IdleAction::new(Mood::Stretch, 2500, Some("🥱 好困啊~")),
        IdleAction::new(Mood::Wave, 2000, Some("👋 嗨！")),
        IdleAction::new(Mood::Blink, 1500, None),
        // Sometimes it just stays put
        IdleAction::new(Mood::Idle, 2000, None),
    ]
}

/// Lines the character says when clicked.
pub fn default_click_messages() -> Vec<String> {
    [
        "有什么可以帮助你的吗？✨",
        "今天也要加油哦！💪",
        "点击产品卡片了解更多~",
        "Murphy 为你提供最好的服务！",
        "需要联系我们吗？滚动到底部吧~",
        "嘿嘿，你发现我啦！🎉",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Uniformly pick one element. `None` only for an empty slice.
pub fn pick<'a, T>(items: &'a [T], random: &mut dyn RandomSource) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let idx = random.pick_index(items.len()).min(items.len() - 1);
    items.get(idx)
}
