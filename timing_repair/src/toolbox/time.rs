use crate::error::ToolboxError;

/// 把 Toolbox 中以秒为单位的十进制时间（如 `12.345`）转换为毫秒。
///
/// 不经过浮点数：`S.mmm` 直接得到 `S * 1000 + mmm`。小数不足三位时右侧补零
/// （`1.5` 为 1500 毫秒），超过三位、带符号或含其它字符都视为无效。
pub fn seconds_to_ms(time_str: &str) -> Result<u64, ToolboxError> {
    let invalid = |reason: &str| ToolboxError::InvalidTime(format!("{time_str} ({reason})"));

    let (seconds_str, fraction_str) = match time_str.split_once('.') {
        Some((seconds, fraction)) => (seconds, Some(fraction)),
        None => (time_str, None),
    };

    if seconds_str.is_empty() || !seconds_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("秒部分必须是非负整数"));
    }
    let seconds: u64 = seconds_str
        .parse()
        .map_err(|_| invalid("秒部分超出范围"))?;

    let milliseconds = match fraction_str {
        None => 0,
        Some(fraction) => {
            if fraction.is_empty()
                || fraction.len() > 3
                || !fraction.bytes().all(|b| b.is_ascii_digit())
            {
                return Err(invalid("小数部分只支持 1 到 3 位数字"));
            }
            let value: u64 = fraction.parse().map_err(|_| invalid("小数部分无效"))?;
            value * 10u64.pow(3 - fraction.len() as u32)
        }
    };

    seconds
        .checked_mul(1000)
        .and_then(|ms| ms.checked_add(milliseconds))
        .ok_or_else(|| invalid("超出范围"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_digit_fractions() {
        assert_eq!(seconds_to_ms("0.500"), Ok(500));
        assert_eq!(seconds_to_ms("1.150"), Ok(1150));
        assert_eq!(seconds_to_ms("1.200"), Ok(1200));
        assert_eq!(seconds_to_ms("2.000"), Ok(2000));
        assert_eq!(seconds_to_ms("123.007"), Ok(123_007));
    }

    #[test]
    fn test_short_fractions_and_integers() {
        assert_eq!(seconds_to_ms("1.5"), Ok(1500));
        assert_eq!(seconds_to_ms("1.05"), Ok(1050));
        assert_eq!(seconds_to_ms("7"), Ok(7000));
    }

    #[test]
    fn test_invalid_times() {
        for input in ["", ".5", "1.", "-1.000", "+1.000", "1.2345", "1,500", "abc", "1.5s"] {
            assert!(
                matches!(seconds_to_ms(input), Err(ToolboxError::InvalidTime(_))),
                "'{input}' 应当无效"
            );
        }
    }
}
