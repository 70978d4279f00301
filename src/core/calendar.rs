use crate::domain::ports::CalendarIndexProvider;

const HEAVENLY_STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
const EARTHLY_BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// 六十甲子紀年：西元 4 年為甲子
#[derive(Debug, Clone, Copy, Default)]
pub struct SexagenaryCalendar;

impl SexagenaryCalendar {
    pub fn new() -> Self {
        Self
    }

    /// 例：2024 → 甲辰
    pub fn gan_zhi_name(&self, year: i32) -> String {
        format!(
            "{}{}",
            HEAVENLY_STEMS[self.year_gan_index(year) as usize],
            EARTHLY_BRANCHES[self.year_zhi_index(year) as usize]
        )
    }
}

impl CalendarIndexProvider for SexagenaryCalendar {
    fn year_gan_index(&self, year: i32) -> u32 {
        (i64::from(year) - 4).rem_euclid(10) as u32
    }

    fn year_zhi_index(&self, year: i32) -> u32 {
        (i64::from(year) - 4).rem_euclid(12) as u32
    }
}
