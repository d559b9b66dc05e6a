use chrono::{Duration, Local, NaiveDate};
use std::collections::HashSet;

/// 读经条目的稳定标识
pub type ReadingId = u32;

/// 读经条目（经文段落）
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingItem {
    pub id: ReadingId,
    pub title: String,
    pub body: String,
}

impl ReadingItem {
    pub fn new(id: ReadingId, title: &str, body: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}

/// 按日期提供读经目录的来源
///
/// 当前只有固定目录实现，但接口按日期取值，
/// 将来可以换成真正的麦琴读经表而不改动 ReadingSet
pub trait ReadingPlan {
    fn readings_for(&self, date: NaiveDate) -> &[ReadingItem];
}

/// 固定目录：无论哪一天都返回同一组经文
pub struct FixedPlan {
    items: Vec<ReadingItem>,
}

impl FixedPlan {
    pub fn new(items: Vec<ReadingItem>) -> Self {
        Self { items }
    }

    /// 内置示例目录
    pub fn sample() -> Self {
        Self::new(vec![
            ReadingItem::new(
                1,
                "Genesis 1",
                "In the beginning God created the heavens and the earth...",
            ),
            ReadingItem::new(2, "Ezra 1", "In the first year of Cyrus king of Persia..."),
            ReadingItem::new(
                3,
                "Matthew 1",
                "The book of the genealogy of Jesus Christ...",
            ),
            ReadingItem::new(4, "Acts 1", "The former account I made, O Theophilus..."),
        ])
    }
}

impl ReadingPlan for FixedPlan {
    fn readings_for(&self, _date: NaiveDate) -> &[ReadingItem] {
        &self.items
    }
}

/// 当前选中的日期
///
/// 相对步进（±N 天）和绝对跳转都是同步的全函数，
/// 任何日期（过去或将来）都有效
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateCursor {
    date: NaiveDate,
}

impl DateCursor {
    /// 从今天开始
    pub fn today() -> Self {
        Self {
            date: Local::now().date_naive(),
        }
    }

    #[allow(dead_code)]
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// 相对步进，跨月/跨年/闰年由 chrono 处理
    ///
    /// 超出 chrono 可表示范围时保持不动
    pub fn shift(&mut self, delta_days: i64) {
        if let Some(date) = self.date.checked_add_signed(Duration::days(delta_days)) {
            self.date = date;
        }
    }

    /// 绝对跳转，无条件接受任何日期
    pub fn jump(&mut self, date: NaiveDate) {
        self.date = date;
    }
}

/// 读经目录 + 已读集合
///
/// 已读状态只存在于本次会话，不做持久化
pub struct ReadingSet {
    plan: Box<dyn ReadingPlan>,
    read: HashSet<ReadingId>,
}

impl ReadingSet {
    pub fn new(plan: Box<dyn ReadingPlan>) -> Self {
        Self {
            plan,
            read: HashSet::new(),
        }
    }

    /// 某一天的读经目录，顺序稳定
    pub fn list(&self, date: NaiveDate) -> &[ReadingItem] {
        self.plan.readings_for(date)
    }

    /// 翻转某个条目的已读状态
    ///
    /// 不在当天目录里的 id 静默忽略
    pub fn toggle_read(&mut self, date: NaiveDate, id: ReadingId) {
        if !self.list(date).iter().any(|item| item.id == id) {
            return;
        }
        if !self.read.remove(&id) {
            self.read.insert(id);
        }
    }

    pub fn is_read(&self, id: ReadingId) -> bool {
        self.read.contains(&id)
    }

    /// 当天已读条目数
    pub fn read_count(&self, date: NaiveDate) -> usize {
        self.list(date)
            .iter()
            .filter(|item| self.read.contains(&item.id))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    #[test]
    fn test_toggle_read_is_own_inverse() {
        let mut set = ReadingSet::new(Box::new(FixedPlan::sample()));
        let date = sample_date();

        assert!(!set.is_read(1));
        set.toggle_read(date, 1);
        assert!(set.is_read(1));
        set.toggle_read(date, 1);
        assert!(!set.is_read(1));

        // 奇数次 = 已读，偶数次 = 回到未读
        for _ in 0..5 {
            set.toggle_read(date, 2);
        }
        assert!(set.is_read(2));
        set.toggle_read(date, 2);
        assert!(!set.is_read(2));
    }

    #[test]
    fn test_toggle_items_independent() {
        let mut set = ReadingSet::new(Box::new(FixedPlan::sample()));
        let date = sample_date();

        set.toggle_read(date, 1);
        set.toggle_read(date, 3);
        assert!(set.is_read(1));
        assert!(!set.is_read(2));
        assert!(set.is_read(3));
        assert!(!set.is_read(4));
        assert_eq!(set.read_count(date), 2);
    }

    #[test]
    fn test_toggle_unknown_id_ignored() {
        let mut set = ReadingSet::new(Box::new(FixedPlan::sample()));
        let date = sample_date();

        set.toggle_read(date, 999);
        assert!(!set.is_read(999));
        assert_eq!(set.read_count(date), 0);
    }

    #[test]
    fn test_catalog_order_stable() {
        let set = ReadingSet::new(Box::new(FixedPlan::sample()));
        let date = sample_date();

        let titles: Vec<&str> = set.list(date).iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Genesis 1", "Ezra 1", "Matthew 1", "Acts 1"]);

        let again: Vec<&str> = set.list(date).iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, again);
    }

    #[test]
    fn test_catalog_same_for_any_date() {
        let set = ReadingSet::new(Box::new(FixedPlan::sample()));
        let a = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2100, 12, 31).unwrap();
        assert_eq!(set.list(a), set.list(b));
    }

    #[test]
    fn test_shift_additivity() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();

        let mut split = DateCursor::new(start);
        split.shift(7);
        split.shift(-19);

        let mut once = DateCursor::new(start);
        once.shift(-12);

        assert_eq!(split.date(), once.date());
    }

    #[test]
    fn test_shift_zero_is_noop() {
        let mut cursor = DateCursor::new(sample_date());
        cursor.shift(0);
        assert_eq!(cursor.date(), sample_date());
    }

    #[test]
    fn test_shift_crosses_month_boundary() {
        let mut cursor = DateCursor::new(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
        cursor.shift(1);
        assert_eq!(cursor.date(), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());

        let mut back = DateCursor::new(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        back.shift(-1);
        assert_eq!(back.date(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn test_shift_leap_year() {
        // 2026 非闰年
        let mut plain = DateCursor::new(NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        plain.shift(1);
        assert_eq!(plain.date(), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());

        // 2028 闰年
        let mut leap = DateCursor::new(NaiveDate::from_ymd_opt(2028, 2, 28).unwrap());
        leap.shift(1);
        assert_eq!(leap.date(), NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
    }

    #[test]
    fn test_jump_accepts_any_date() {
        let mut cursor = DateCursor::today();
        let past = NaiveDate::from_ymd_opt(1900, 6, 1).unwrap();
        cursor.jump(past);
        assert_eq!(cursor.date(), past);

        let future = NaiveDate::from_ymd_opt(2200, 1, 1).unwrap();
        cursor.jump(future);
        assert_eq!(cursor.date(), future);
    }
}
