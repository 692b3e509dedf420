//! 规范化规则定义
//!
//! 每条规则是一个 `&str -> String` 的替换函数，由引擎按固定顺序依次应用。
//! 顺序决定优先级：日期、时间、电话等结构化片段必须先于通用数字规则处理。

use aho_corasick::{AhoCorasick, MatchKind};
use anyhow::Result;
use regex::{Captures, Regex};

use crate::tn::num::{verbalize_cardinal, verbalize_digits, verbalize_number};

/// 规则函数
pub type Rule = fn(&str) -> String;

/// 按优先级排列的规则链
pub const RULES: &[Rule] = &[
    replace_date,
    replace_date_numeric,
    replace_time_range,
    replace_time,
    replace_ratio,
    replace_temperature,
    replace_fraction,
    replace_percentage,
    replace_mobile,
    replace_telephone,
    replace_national_uniform,
    replace_range,
    replace_negative_or_decimal,
    replace_quantifier,
    replace_digit_run,
    replace_number,
];

/// 量词（数字后接量词时按基数读）
const MEASURE_WORDS: &[&str] = &[
    "个", "只", "分", "万", "亿", "秒", "块", "元", "角", "毛", "次", "年", "月", "日", "天",
    "号", "人", "件", "本", "张", "条", "台", "辆", "克", "千克", "公斤", "斤", "两", "米",
    "厘米", "毫米", "公里", "千米", "里", "吨", "升", "毫升", "岁", "位", "名", "页", "层",
    "楼", "倍", "户", "家", "所", "座", "棵", "朵", "头", "匹", "份", "首", "部", "集", "场",
    "届", "期", "种", "项", "杯", "瓶", "碗", "盒", "箱", "包", "双", "对", "套", "批", "组",
    "路", "班", "站", "篇", "段", "句", "行", "颗", "粒", "片", "根", "支", "把", "门", "节",
    "章", "周", "小时", "分钟", "毫秒", "平方米", "立方米", "英里", "英尺", "码", "磅",
    "美元", "欧元", "英镑", "日元", "港元", "块钱", "间", "栋", "幢", "艘", "架", "枚", "辈",
];

lazy_static::lazy_static! {
    static ref RE_DATE: Regex = Regex::new(
        r"([0-9]{4}|[0-9]{2})年(?:((?:0?[1-9])|(?:1[0-2]))月)?(?:((?:0?[1-9])|(?:[12][0-9])|30|31)([日号]))?"
    ).unwrap();
    static ref RE_DATE_NUMERIC: Regex = Regex::new(
        r"([0-9]{4})([-/.])(0[1-9]|1[0-2])([-/.])(0[1-9]|[12][0-9]|3[01])"
    ).unwrap();
    static ref RE_TIME_RANGE: Regex = Regex::new(
        r"([01]?[0-9]|2[0-3]):([0-5][0-9])(?::([0-5][0-9]))?\s*[~-]\s*([01]?[0-9]|2[0-3]):([0-5][0-9])(?::([0-5][0-9]))?"
    ).unwrap();
    static ref RE_TIME: Regex = Regex::new(r"([01]?[0-9]|2[0-3]):([0-5][0-9])(?::([0-5][0-9]))?").unwrap();
    static ref RE_RATIO: Regex = Regex::new(r"([0-9]+(?:\.[0-9]+)?):([0-9]+(?:\.[0-9]+)?)").unwrap();
    static ref RE_TEMPERATURE: Regex = Regex::new(r"(-?)([0-9]+(?:\.[0-9]+)?)(°C|℃|摄氏度|度|°)").unwrap();
    static ref RE_FRACTION: Regex = Regex::new(r"(-?)([0-9]+)/([0-9]+)").unwrap();
    static ref RE_PERCENTAGE: Regex = Regex::new(r"(-?)([0-9]+(?:\.[0-9]+)?)%").unwrap();
    static ref RE_MOBILE: Regex = Regex::new(r"(?:\+?86 ?)?1[3-9][0-9]{9}").unwrap();
    static ref RE_TELEPHONE: Regex = Regex::new(r"(?:0(?:10|2[1-9]|[3-9][0-9]{2})-?)?[1-9][0-9]{6,7}").unwrap();
    static ref RE_NATIONAL_UNIFORM: Regex = Regex::new(r"400-?[0-9]{3}-?[0-9]{4}").unwrap();
    static ref RE_RANGE: Regex = Regex::new(r"(-?[0-9]+(?:\.[0-9]+)?)[~-](-?[0-9]+(?:\.[0-9]+)?)").unwrap();
    static ref RE_NEGATIVE_OR_DECIMAL: Regex = Regex::new(r"-?[0-9]+\.[0-9]+|-[0-9]+").unwrap();
    static ref RE_QUANTIFIER: Regex = {
        let mut words: Vec<&str> = MEASURE_WORDS.to_vec();
        // 最长优先，避免「千克」被「千」截断之类的问题
        words.sort_by_key(|w| std::cmp::Reverse(w.chars().count()));
        let alternation = words.join("|");
        Regex::new(&format!(r"([0-9]+)([多余几+])?({})", alternation)).unwrap()
    };
    static ref RE_DIGIT_RUN: Regex = Regex::new(r"[0-9]{3,}").unwrap();
    static ref RE_NUMBER: Regex = Regex::new(r"[0-9]+(?:\.[0-9]+)?|\.[0-9]+").unwrap();
}

/// 匹配片段左侧（及可选的右侧）不是数字（模拟零宽断言）
fn is_bounded(text: &str, start: usize, end: usize, check_after: bool) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(|c| c.is_ascii_digit())
        && !(check_after && after.is_some_and(|c| c.is_ascii_digit()))
}

fn replace_guarded<F>(re: &Regex, text: &str, check_after: bool, f: F) -> String
where
    F: Fn(&Captures) -> Option<String>,
{
    re.replace_all(text, |caps: &Captures| {
        let bounded = caps
            .get(0)
            .is_some_and(|m| is_bounded(text, m.start(), m.end(), check_after));
        let replaced = if bounded { f(caps) } else { None };
        replaced.unwrap_or_else(|| caps[0].to_string())
    })
    .into_owned()
}

/// 带数字边界检查的替换：边界不满足或回调返回 None 时保留原文
fn replace_bounded<F>(re: &Regex, text: &str, f: F) -> String
where
    F: Fn(&Captures) -> Option<String>,
{
    replace_guarded(re, text, true, f)
}

/// 只检查左边界，右侧允许紧跟数字（如「12块5」）
fn replace_left_bounded<F>(re: &Regex, text: &str, f: F) -> String
where
    F: Fn(&Captures) -> Option<String>,
{
    replace_guarded(re, text, false, f)
}

fn group<'a>(caps: &'a Captures, i: usize) -> Option<&'a str> {
    caps.get(i).map(|m| m.as_str())
}

// ============================================================================
// 日期与时间
// ============================================================================

/// 「1995年3月1日」→「一九九五年三月一日」
pub fn replace_date(text: &str) -> String {
    replace_bounded(&RE_DATE, text, |caps| {
        let mut result = format!("{}年", verbalize_digits(&caps[1], false));
        if let Some(month) = group(caps, 2) {
            result.push_str(&format!("{}月", verbalize_cardinal(month)));
        }
        if let (Some(day), Some(suffix)) = (group(caps, 3), group(caps, 4)) {
            result.push_str(&format!("{}{}", verbalize_cardinal(day), suffix));
        }
        Some(result)
    })
}

/// 「2024-01-02」「2024/01/02」→「二零二四年一月二日」
///
/// 分隔符不一致时不当作日期，各段逐位读：「2024-01/02」→「二零二四杠零一斜杠零二」
pub fn replace_date_numeric(text: &str) -> String {
    replace_bounded(&RE_DATE_NUMERIC, text, |caps| {
        if caps[2] != caps[4] {
            return Some(format!(
                "{}{}{}{}{}",
                verbalize_digits(&caps[1], false),
                separator_reading(&caps[2]),
                verbalize_digits(&caps[3], false),
                separator_reading(&caps[4]),
                verbalize_digits(&caps[5], false)
            ));
        }
        Some(format!(
            "{}年{}月{}日",
            verbalize_digits(&caps[1], false),
            verbalize_cardinal(&caps[3]),
            verbalize_cardinal(&caps[5])
        ))
    })
}

fn separator_reading(sep: &str) -> &'static str {
    match sep {
        "-" => "杠",
        "/" => "斜杠",
        _ => "点",
    }
}

/// 时分秒读法：「12:05」→「十二点零五分」，整点省略分钟
fn verbalize_time(hour: &str, minute: &str, second: Option<&str>) -> String {
    let mut result = format!("{}点", verbalize_cardinal(hour));
    if minute.trim_start_matches('0').is_empty() {
        if second.is_some_and(|s| !s.trim_start_matches('0').is_empty()) {
            result.push_str("零分");
        }
    } else {
        result.push_str(&verbalize_clock_part(minute));
        result.push('分');
    }
    if let Some(second) = second {
        if !second.trim_start_matches('0').is_empty() {
            result.push_str(&verbalize_clock_part(second));
            result.push('秒');
        }
    }
    result
}

/// 两位分秒：「05」→「零五」，「30」→「三十」
fn verbalize_clock_part(part: &str) -> String {
    match part.strip_prefix('0') {
        Some(rest) if !rest.is_empty() => format!("零{}", verbalize_cardinal(rest)),
        _ => verbalize_cardinal(part),
    }
}

/// 「8:30~9:30」→「八点三十分至九点三十分」
pub fn replace_time_range(text: &str) -> String {
    replace_bounded(&RE_TIME_RANGE, text, |caps| {
        Some(format!(
            "{}至{}",
            verbalize_time(&caps[1], &caps[2], group(caps, 3)),
            verbalize_time(&caps[4], &caps[5], group(caps, 6))
        ))
    })
}

pub fn replace_time(text: &str) -> String {
    replace_bounded(&RE_TIME, text, |caps| {
        Some(verbalize_time(&caps[1], &caps[2], group(caps, 3)))
    })
}

/// 不构成合法时间的「数:数」按比分读：「3:2」→「三比二」，「12:60」→「十二比六十」
pub fn replace_ratio(text: &str) -> String {
    replace_bounded(&RE_RATIO, text, |caps| {
        Some(format!(
            "{}比{}",
            verbalize_number(&caps[1]),
            verbalize_number(&caps[2])
        ))
    })
}

// ============================================================================
// 温度、分数、百分比
// ============================================================================

/// 「-10°C」→「零下十度」
pub fn replace_temperature(text: &str) -> String {
    replace_bounded(&RE_TEMPERATURE, text, |caps| {
        let sign = if caps[1].is_empty() { "" } else { "零下" };
        let unit = if &caps[3] == "摄氏度" { "摄氏度" } else { "度" };
        Some(format!("{}{}{}", sign, verbalize_number(&caps[2]), unit))
    })
}

/// 「7/12」→「十二分之七」
pub fn replace_fraction(text: &str) -> String {
    replace_bounded(&RE_FRACTION, text, |caps| {
        let sign = if caps[1].is_empty() { "" } else { "负" };
        Some(format!(
            "{}{}分之{}",
            sign,
            verbalize_cardinal(&caps[3]),
            verbalize_cardinal(&caps[2])
        ))
    })
}

/// 「62%」→「百分之六十二」
pub fn replace_percentage(text: &str) -> String {
    replace_bounded(&RE_PERCENTAGE, text, |caps| {
        let sign = if caps[1].is_empty() { "" } else { "负" };
        Some(format!("{}百分之{}", sign, verbalize_number(&caps[2])))
    })
}

// ============================================================================
// 电话号码
// ============================================================================

/// 号码逐位读（1 读作「幺」），各段之间以「，」分隔
fn verbalize_phone<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .map(|p| verbalize_digits(p, true))
        .collect::<Vec<_>>()
        .join("，")
}

/// 「+86 18544139121」→「八六，幺八五四四幺三九幺二幺」
pub fn replace_mobile(text: &str) -> String {
    replace_bounded(&RE_MOBILE, text, |caps| {
        Some(verbalize_phone(caps[0].trim_start_matches('+').split(' ')))
    })
}

/// 「0421-33441122」→「零四二幺，三三四四幺幺二二」
pub fn replace_telephone(text: &str) -> String {
    replace_bounded(&RE_TELEPHONE, text, |caps| {
        Some(verbalize_phone(caps[0].split('-')))
    })
}

/// 「400-123-4567」
pub fn replace_national_uniform(text: &str) -> String {
    replace_bounded(&RE_NATIONAL_UNIFORM, text, |caps| {
        Some(verbalize_phone(caps[0].split('-')))
    })
}

// ============================================================================
// 通用数字
// ============================================================================

/// 「12~23」→「十二到二十三」，「-1.5~2」→「负一点五到二」
pub fn replace_range(text: &str) -> String {
    replace_bounded(&RE_RANGE, text, |caps| {
        Some(format!(
            "{}到{}",
            verbalize_number(&caps[1]),
            verbalize_number(&caps[2])
        ))
    })
}

/// 负数与小数：「324.75」→「三百二十四点七五」，「-3」→「负三」
pub fn replace_negative_or_decimal(text: &str) -> String {
    replace_bounded(&RE_NEGATIVE_OR_DECIMAL, text, |caps| {
        Some(verbalize_number(&caps[0]))
    })
}

/// 数字 + 量词按基数读：「583分」→「五百八十三分」
pub fn replace_quantifier(text: &str) -> String {
    replace_left_bounded(&RE_QUANTIFIER, text, |caps| {
        let modifier = match group(caps, 2) {
            Some("+") => "多",
            Some(m) => m,
            None => "",
        };
        Some(format!(
            "{}{}{}",
            verbalize_cardinal(&caps[1]),
            modifier,
            &caps[3]
        ))
    })
}

/// 三位及以上的裸数字串逐位读（编号等）：「27149」→「二七一四九」
pub fn replace_digit_run(text: &str) -> String {
    replace_bounded(&RE_DIGIT_RUN, text, |caps| {
        Some(verbalize_digits(&caps[0], false))
    })
}

/// 剩余数字按基数读
pub fn replace_number(text: &str) -> String {
    replace_bounded(&RE_NUMBER, text, |caps| Some(verbalize_number(&caps[0])))
}

// ============================================================================
// 符号
// ============================================================================

/// 符号 → 读法 映射（规则链之后执行）
pub struct SymbolTable {
    matcher: AhoCorasick,
    replacements: Vec<&'static str>,
}

impl SymbolTable {
    pub fn new() -> Result<Self> {
        let pairs: &[(&str, &str)] = &[
            ("~", "至"),
            ("/", "每"),
            ("+", "加"),
            ("=", "等于"),
            ("×", "乘"),
            ("÷", "除以"),
            ("℃", "摄氏度"),
            ("°C", "摄氏度"),
            ("℉", "华氏度"),
            ("°F", "华氏度"),
            ("‰", "千分号"),
            ("&", "和"),
        ];
        let patterns: Vec<&str> = pairs.iter().map(|(p, _)| *p).collect();
        let replacements = pairs.iter().map(|(_, r)| *r).collect();
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(patterns)?;
        Ok(Self {
            matcher,
            replacements,
        })
    }

    pub fn replace(&self, text: &str) -> String {
        self.matcher.replace_all(text, &self.replacements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date() {
        assert_eq!(
            replace_date("她出生于86年8月18日"),
            "她出生于八六年八月十八日"
        );
        assert_eq!(replace_date("1995年3月1日"), "一九九五年三月一日");
        assert_eq!(replace_date("2024年"), "二零二四年");
    }

    #[test]
    fn test_date_numeric() {
        assert_eq!(replace_date_numeric("2024-01-02"), "二零二四年一月二日");
        assert_eq!(replace_date_numeric("2024/12/31"), "二零二四年十二月三十一日");
        // 分隔符不一致时逐位读，不再交给范围规则
        assert_eq!(replace_date_numeric("2024-01/02"), "二零二四杠零一斜杠零二");
    }

    #[test]
    fn test_time() {
        assert_eq!(replace_time("等会请在12:05请通知我"), "等会请在十二点零五分请通知我");
        assert_eq!(replace_time("8:00"), "八点");
        assert_eq!(replace_time("23:30:15"), "二十三点三十分十五秒");
    }

    #[test]
    fn test_time_range() {
        assert_eq!(replace_time_range("8:30~9:30"), "八点三十分至九点三十分");
    }

    #[test]
    fn test_temperature() {
        assert_eq!(
            replace_temperature("今天的最低气温达到-10°C"),
            "今天的最低气温达到零下十度"
        );
        assert_eq!(replace_temperature("36.5℃"), "三十六点五度");
        assert_eq!(replace_temperature("25摄氏度"), "二十五摄氏度");
    }

    #[test]
    fn test_fraction_and_percentage() {
        assert_eq!(
            replace_fraction("现场有7/12的观众投出了赞成票"),
            "现场有十二分之七的观众投出了赞成票"
        );
        assert_eq!(replace_percentage("明天有62%的概率降雨"), "明天有百分之六十二的概率降雨");
        assert_eq!(replace_percentage("-0.5%"), "负百分之零点五");
    }

    #[test]
    fn test_mobile() {
        assert_eq!(
            replace_mobile("这是手机+86 18544139121"),
            "这是手机八六，幺八五四四幺三九幺二幺"
        );
        assert_eq!(replace_mobile("13800138000"), "幺三八零零幺三八零零零");
        // 前后紧跟数字时不视为手机号
        assert_eq!(replace_mobile("138001380001"), "138001380001");
    }

    #[test]
    fn test_telephone() {
        assert_eq!(
            replace_telephone("这是固话0421-33441122"),
            "这是固话零四二幺，三三四四幺幺二二"
        );
        assert_eq!(replace_national_uniform("400-123-4567"), "四零零，幺二三，四五六七");
    }

    #[test]
    fn test_range() {
        assert_eq!(replace_range("12~23"), "十二到二十三");
        assert_eq!(replace_range("-1.5~2"), "负一点五到二");
    }

    #[test]
    fn test_negative_or_decimal() {
        assert_eq!(replace_negative_or_decimal("这块黄金重达324.75克"), "这块黄金重达三百二十四点七五克");
        assert_eq!(replace_negative_or_decimal("20.1万"), "二十点一万");
        assert_eq!(replace_negative_or_decimal("-3"), "负三");
    }

    #[test]
    fn test_quantifier() {
        assert_eq!(replace_quantifier("我们班的最高总分为583分"), "我们班的最高总分为五百八十三分");
        assert_eq!(replace_quantifier("12块5"), "十二块5");
        assert_eq!(replace_quantifier("3公斤"), "三公斤");
        assert_eq!(replace_quantifier("100+人"), "一百多人");
        // 量词后紧跟数字仍按基数读
        assert_eq!(replace_quantifier("价格100块5"), "价格一百块5");
        assert_eq!(replace_quantifier("1500块5"), "一千五百块5");
    }

    #[test]
    fn test_ratio() {
        assert_eq!(replace_ratio("比分3:2"), "比分三比二");
        assert_eq!(replace_time("12:60"), "12:60");
        assert_eq!(replace_ratio("12:60"), "十二比六十");
    }

    #[test]
    fn test_non_ascii_digits_untouched() {
        // 阿拉伯-印度数字不参与任何数字规则
        assert_eq!(replace_number("第٣"), "第٣");
        assert_eq!(replace_digit_run("编号١٢٣"), "编号١٢٣");
    }

    #[test]
    fn test_digit_run_and_number() {
        assert_eq!(replace_digit_run("编号27149"), "编号二七一四九");
        assert_eq!(replace_digit_run("12"), "12");
        assert_eq!(replace_number("第5"), "第五");
        assert_eq!(replace_number(".5"), "零点五");
    }

    #[test]
    fn test_symbol_table() {
        let table = SymbolTable::new().unwrap();
        assert_eq!(table.replace("1+1=2"), "1加1等于2");
        assert_eq!(table.replace("°C"), "摄氏度");
        assert_eq!(table.replace("无符号"), "无符号");
    }
}
