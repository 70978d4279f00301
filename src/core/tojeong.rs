use crate::domain::model::{MonthlyFortune, TojeongMeaning, TojeongResult};
use crate::domain::ports::CalendarIndexProvider;

const TRIGRAMS: [&str; 8] = [
    "건(Sky)",
    "태(Lake)",
    "이(Fire)",
    "진(Thunder)",
    "손(Wind)",
    "감(Water)",
    "간(Mountain)",
    "곤(Earth)",
];

const TRIGRAM_ENERGY: [&str; 8] = [
    "Strong Yang",
    "Joy",
    "Passion",
    "Action",
    "Gentleness",
    "Wisdom",
    "Stability",
    "Receptivity",
];

const JOONG_MEANINGS: [&str; 6] = [
    "Spring/Growth",
    "Summer/Expansion",
    "Autumn/Harvest",
    "Winter/Storage",
    "Center/Balance",
    "Transition/Change",
];

const HA_MEANINGS: [&str; 3] = [
    "Heavenly Luck (Opportunity)",
    "Earthly Luck (Environment)",
    "Human Luck (Effort)",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FortuneLevel {
    Great,
    Good,
    Neutral,
    Caution,
}

impl FortuneLevel {
    fn from_rating_base(base: i64) -> (u8, Self) {
        match base {
            80.. => (5, FortuneLevel::Great),
            55..=79 => (4, FortuneLevel::Good),
            30..=54 => (3, FortuneLevel::Neutral),
            _ => (2, FortuneLevel::Caution),
        }
    }

    fn texts(&self) -> &'static [&'static str; 4] {
        match self {
            FortuneLevel::Great => &[
                "만사형통의 기운이 가득합니다. 새로운 시작에 최적의 시기입니다.",
                "귀인이 나타나 큰 도움을 받을 수 있습니다. 인연을 소중히 하세요.",
                "재물운이 크게 상승합니다. 투자와 계약에 좋은 달입니다.",
                "뜻한 바가 이루어지는 달입니다. 자신감을 가지고 추진하세요.",
            ],
            FortuneLevel::Good => &[
                "전반적으로 순조로운 흐름입니다. 꾸준한 노력이 결실을 맺습니다.",
                "소소한 기쁨이 찾아오는 달입니다. 주변 사람들과 나누세요.",
                "안정적인 운세입니다. 현재 하는 일에 집중하면 좋은 결과가 있습니다.",
                "건강이 좋아지는 시기입니다. 운동을 시작하기에 좋습니다.",
            ],
            FortuneLevel::Neutral => &[
                "큰 변화 없이 평탄한 달입니다. 내면을 돌아보는 시간을 가지세요.",
                "기다림이 필요한 시기입니다. 조급함을 버리면 길이 열립니다.",
                "작은 시련이 있으나 금방 지나갑니다. 침착하게 대처하세요.",
                "배움의 시기입니다. 새로운 것을 익히면 좋은 기회가 옵니다.",
            ],
            FortuneLevel::Caution => &[
                "건강관리에 특히 신경 쓰세요. 과로를 피하고 충분히 쉬세요.",
                "금전적 지출이 많을 수 있습니다. 절약하는 자세가 필요합니다.",
                "대인관계에서 오해가 생길 수 있습니다. 말을 아끼세요.",
                "변화를 서두르지 마세요. 때를 기다리는 지혜가 필요합니다.",
            ],
        }
    }

    fn keywords(&self) -> &'static [&'static str; 4] {
        match self {
            FortuneLevel::Great => &["대길", "형통", "발복", "귀인"],
            FortuneLevel::Good => &["순조", "안정", "성장", "길"],
            FortuneLevel::Neutral => &["평온", "기다림", "내면", "준비"],
            FortuneLevel::Caution => &["주의", "절제", "인내", "신중"],
        }
    }
}

/// 土亭秘訣：出生日期與目標年份 → 上/中/下卦
pub struct TojeongEngine<C: CalendarIndexProvider> {
    calendar: C,
}

impl<C: CalendarIndexProvider> TojeongEngine<C> {
    pub fn new(calendar: C) -> Self {
        Self { calendar }
    }

    /// 月份與日期範圍由呼叫端先驗證；此函式對任何整數輸入都有定義
    pub fn compute(
        &self,
        birth_year: i32,
        birth_month: u32,
        birth_day: u32,
        target_year: i32,
    ) -> TojeongResult {
        let birth_year = i64::from(birth_year);
        let month = i64::from(birth_month);
        let day = i64::from(birth_day);

        // 虛歲
        let age = i64::from(target_year) - birth_year + 1;

        let tae_se_su = self.tae_se_su(target_year);
        let target_year = i64::from(target_year);
        let wol_geon_su = ((target_year + month) * 7).rem_euclid(20) + 1;
        let il_jin_su = ((target_year + month + day) * 3).rem_euclid(20) + 1;

        let sang = wrap_to_range(age + tae_se_su, 8);
        let joong = wrap_to_range(month + wol_geon_su, 6);
        let ha = wrap_to_range(day + il_jin_su, 3);

        let meaning = TojeongMeaning {
            sang: format!(
                "{} (Energy: {})",
                TRIGRAMS[sang as usize - 1],
                TRIGRAM_ENERGY[sang as usize - 1]
            ),
            joong: format!("{} - {}", joong, JOONG_MEANINGS[joong as usize - 1]),
            ha: format!("{} - {}", ha, HA_MEANINGS[ha as usize - 1]),
        };

        TojeongResult {
            code: format!("{}{}{}", sang, joong, ha),
            sang,
            joong,
            ha,
            meaning,
            monthly: monthly_fortunes(sang, joong, ha, birth_year, month, day),
        }
    }

    fn tae_se_su(&self, target_year: i32) -> i64 {
        let seed = i64::from(target_year) * 13
            + i64::from(self.calendar.year_gan_index(target_year)) * 7
            + i64::from(self.calendar.year_zhi_index(target_year)) * 3;
        seed.rem_euclid(20) + 1
    }
}

/// 取模後 0 對應到 modulus 本身，結果落在 1..=modulus
fn wrap_to_range(value: i64, modulus: i64) -> u8 {
    match value.rem_euclid(modulus) {
        0 => modulus as u8,
        r => r as u8,
    }
}

fn monthly_fortunes(
    sang: u8,
    joong: u8,
    ha: u8,
    birth_year: i64,
    birth_month: i64,
    birth_day: i64,
) -> Vec<MonthlyFortune> {
    let code = i64::from(sang) * 100 + i64::from(joong) * 10 + i64::from(ha);

    (1..=12u32)
        .map(|m| {
            let m64 = i64::from(m);
            let seed = code * 13 + m64 * 7 + birth_year * 3 + birth_month * 5 + birth_day;
            let rating_base = (seed * 17 + m64 * 23).rem_euclid(100);
            let (rating, level) = FortuneLevel::from_rating_base(rating_base);

            let texts = level.texts();
            let keywords = level.keywords();
            let text_idx = (seed * 31 + m64).rem_euclid(texts.len() as i64) as usize;
            let keyword_idx = (seed * 11 + m64 * 3).rem_euclid(keywords.len() as i64) as usize;

            MonthlyFortune {
                month: m,
                month_name: format!("{}월", m),
                fortune: texts[text_idx].to_string(),
                rating,
                keyword: keywords[keyword_idx].to_string(),
            }
        })
        .collect()
}
