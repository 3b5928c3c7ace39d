//! # EAF 解析器的工具函数
//!
//! 属性提取、实体解码和时间值解析。

use elan_core::EafError;
use quick_xml::{
    Reader,
    events::{BytesRef, BytesStart},
};
use tracing::warn;

/// 获取字符串类型的属性值。属性不存在时返回 `None`。
pub(super) fn get_string_attribute(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    attr_name: &[u8],
) -> Result<Option<String>, EafError> {
    e.try_get_attribute(attr_name)?
        .map(|attr| {
            attr.decode_and_unescape_value(reader.decoder())
                .map(|v| v.into_owned())
                .map_err(EafError::from)
        })
        .transpose()
}

/// 获取必需的属性值，缺失时返回 `EafError::MissingAttribute`。
pub(super) fn get_required_attribute(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    attr_name: &[u8],
) -> Result<String, EafError> {
    get_string_attribute(e, reader, attr_name)?.ok_or_else(|| EafError::MissingAttribute {
        element: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
        attribute: String::from_utf8_lossy(attr_name).into_owned(),
    })
}

/// 获取 `"true"` / `"false"` 形式的布尔属性，缺失时返回 `default`。
pub(super) fn get_bool_attribute(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    attr_name: &[u8],
    default: bool,
) -> Result<bool, EafError> {
    Ok(get_string_attribute(e, reader, attr_name)?
        .map_or(default, |v| v.trim().eq_ignore_ascii_case("true")))
}

/// 收集元素上除 `known` 以外的全部属性，保持原有顺序。
pub(super) fn collect_attributes_except(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    known: &[&[u8]],
) -> Result<Vec<(String, String)>, EafError> {
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        if known.contains(&attr.key.as_ref()) {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.decode_and_unescape_value(reader.decoder())?.into_owned();
        attributes.push((key, value));
    }
    Ok(attributes)
}

/// 解析 `TIME_VALUE`（整数毫秒）。
pub(super) fn parse_time_value(value: &str) -> Result<u64, EafError> {
    value.trim().parse::<u64>().map_err(|e| {
        EafError::InvalidTime(format!("时间值 '{value}' 不是非负整数毫秒: {e}"))
    })
}

/// 把 `&amp;`、`&#233;` 一类的实体引用解码成字符。无法识别的实体返回 `None`。
pub(super) fn resolve_entity(e: &BytesRef) -> Option<char> {
    let Ok(entity_name) = std::str::from_utf8(e.as_ref()) else {
        warn!("无法将实体名解码为UTF-8，已忽略");
        return None;
    };

    if let Some(num_str) = entity_name.strip_prefix('#') {
        let (radix, code_point_str) = num_str
            .strip_prefix('x')
            .map_or((10, num_str), |stripped| (16, stripped));

        return u32::from_str_radix(code_point_str, radix)
            .ok()
            .and_then(char::from_u32)
            .or_else(|| {
                warn!("无法解析无效的XML数字实体 '&{entity_name};'");
                None
            });
    }

    match entity_name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            warn!("忽略了未知的XML实体 '&{entity_name};'");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_value() {
        assert_eq!(parse_time_value("0").unwrap(), 0);
        assert_eq!(parse_time_value(" 1520 ").unwrap(), 1520);
        assert!(matches!(
            parse_time_value("1.5"),
            Err(EafError::InvalidTime(_))
        ));
        assert!(matches!(
            parse_time_value("-10"),
            Err(EafError::InvalidTime(_))
        ));
    }

    #[test]
    fn test_resolve_entity() {
        assert_eq!(resolve_entity(&BytesRef::new("amp")), Some('&'));
        assert_eq!(resolve_entity(&BytesRef::new("#233")), Some('é'));
        assert_eq!(resolve_entity(&BytesRef::new("#x4E2D")), Some('中'));
        assert_eq!(resolve_entity(&BytesRef::new("nbsp")), None);
    }
}
