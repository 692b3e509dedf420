//! 数字读法
//!
//! 基数读法（十百千 + 万亿分组）、逐位读法、小数读法

const DIGITS: [char; 10] = ['零', '一', '二', '三', '四', '五', '六', '七', '八', '九'];

/// 组内位权
const UNITS: [&str; 4] = ["", "十", "百", "千"];

/// 分组位权（每 4 位一组）
const GROUP_UNITS: [&str; 4] = ["", "万", "亿", "万亿"];

/// 单个数字字符的读法，非数字返回 None
fn digit_char(ch: char, alt_one: bool) -> Option<char> {
    let d = ch.to_digit(10)? as usize;
    if alt_one && d == 1 {
        Some('幺')
    } else {
        Some(DIGITS[d])
    }
}

/// 逐位读数字（如 "27149" → "二七一四九"）
///
/// `alt_one` 为 true 时 1 读作「幺」（电话号码）；非数字字符原样保留
pub fn verbalize_digits(digits: &str, alt_one: bool) -> String {
    digits
        .chars()
        .map(|ch| digit_char(ch, alt_one).unwrap_or(ch))
        .collect()
}

/// 读一个不超过 4 位的分组（已去除前导零）
fn verbalize_group(group: &[u8]) -> String {
    let mut result = String::new();
    let mut pending_zero = false;
    let len = group.len();

    for (i, &d) in group.iter().enumerate() {
        if d == 0 {
            if !result.is_empty() {
                pending_zero = true;
            }
            continue;
        }
        if pending_zero {
            result.push('零');
            pending_zero = false;
        }
        result.push(DIGITS[d as usize]);
        result.push_str(UNITS[len - 1 - i]);
    }

    result
}

/// 整数基数读法（如 "583" → "五百八十三"，"100001" → "十万零一"）
///
/// 输入为纯数字串；超过 16 位时退化为逐位读法
pub fn verbalize_cardinal(number: &str) -> String {
    let stripped = number.trim_start_matches('0');
    if stripped.is_empty() {
        return if number.is_empty() {
            String::new()
        } else {
            DIGITS[0].to_string()
        };
    }
    if !stripped.bytes().all(|b| b.is_ascii_digit()) {
        return verbalize_digits(number, false);
    }
    if stripped.len() > 16 {
        return verbalize_digits(stripped, false);
    }

    let digits: Vec<u8> = stripped.bytes().map(|b| b - b'0').collect();
    let group_count = (digits.len() + 3) / 4;
    let first_len = digits.len() - (group_count - 1) * 4;

    let mut result = String::new();
    let mut pending_zero = false;
    let mut start = 0;

    for g in 0..group_count {
        let glen = if g == 0 { first_len } else { 4 };
        let group = &digits[start..start + glen];
        start += glen;

        if group.iter().all(|&d| d == 0) {
            pending_zero = true;
            continue;
        }

        // 分组之间的零：前一组全零，或本组以零开头
        if !result.is_empty() && (pending_zero || group[0] == 0) {
            result.push('零');
        }

        let leading_zeros = group.iter().take_while(|&&d| d == 0).count();
        result.push_str(&verbalize_group(&group[leading_zeros..]));
        result.push_str(GROUP_UNITS[group_count - 1 - g]);
        pending_zero = false;
    }

    // 10 - 19 开头省略「一」：一十二 → 十二
    match result.strip_prefix("一十") {
        Some(rest) => format!("十{}", rest),
        None => result,
    }
}

/// 带符号与小数的数字读法（如 "-1.5" → "负一点五"，".5" → "零点五"）
pub fn verbalize_number(number: &str) -> String {
    let (sign, body) = match number.strip_prefix('-') {
        Some(rest) => ("负", rest),
        None => ("", number),
    };

    let reading = match body.split_once('.') {
        Some((integer, fraction)) => {
            let integer = if integer.is_empty() { "0" } else { integer };
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                verbalize_cardinal(integer)
            } else {
                format!(
                    "{}点{}",
                    verbalize_cardinal(integer),
                    verbalize_digits(fraction, false)
                )
            }
        }
        None => verbalize_cardinal(body),
    };

    format!("{}{}", sign, reading)
}
