//! # EAF 生成器 - `TIME_ORDER`

use elan_core::{EafError, TimeOrder};
use quick_xml::Writer;

/// 写入全部时间槽。没有时间值的时间槽省略 `TIME_VALUE` 属性。
pub(super) fn write_time_order<W: std::io::Write>(
    writer: &mut Writer<W>,
    time_order: &TimeOrder,
) -> Result<(), EafError> {
    let builder = writer.create_element("TIME_ORDER");
    if time_order.is_empty() {
        builder.write_empty()?;
        return Ok(());
    }

    builder.write_inner_content(|writer| {
        for slot in time_order {
            let mut slot_builder = writer
                .create_element("TIME_SLOT")
                .with_attribute(("TIME_SLOT_ID", slot.id().to_string().as_str()));
            if let Some(value) = slot.time_value() {
                slot_builder = slot_builder.with_attribute(("TIME_VALUE", value.to_string().as_str()));
            }
            slot_builder.write_empty()?;
        }
        Ok(())
    })?;
    Ok(())
}
