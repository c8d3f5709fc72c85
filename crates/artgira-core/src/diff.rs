//! Universe diff engine
//!
//! Compares two snapshots over the assigned range of a [`ChannelTable`] and
//! translates every changed slot into an automation value.

use crate::channels::ChannelTable;
use crate::universe::Universe;
use crate::values::{Value, ValueBody};

/// Scale a raw DMX byte to the automation percentage range.
///
/// Truncates: `1 -> 0`, `128 -> 50`, `255 -> 100`.
pub fn dmx_to_percent(raw: u8) -> u8 {
    (u16::from(raw) * 100 / 255) as u8
}

/// Values needed to move the automation system from `current` to `target`.
///
/// Returns `None` when no assigned slot changed. Direct channel values come
/// first in offset order, followed by the on/off groups touched by the
/// change, in table order.
pub fn diff(table: &ChannelTable, current: &Universe, target: &Universe) -> Option<ValueBody> {
    let mut changed = Vec::new();
    let mut out = ValueBody::new();

    // channels() covers exactly [0, cursor)
    for (offset, channel) in table.channels().iter().enumerate() {
        if current[offset] == target[offset] {
            continue;
        }
        changed.push(offset);
        out.push(Value::new(
            channel.uid.as_str(),
            dmx_to_percent(target[offset]).to_string(),
        ));
    }

    if out.is_empty() {
        return None;
    }

    if !table.auto_on_off() {
        return Some(out);
    }

    for group in table.on_off_groups() {
        if !group.channels.iter().any(|c| changed.contains(c)) {
            continue;
        }
        let on = group.channels.iter().any(|&c| target[c] > 0);
        out.push(Value::new(group.uid.as_str(), if on { "1" } else { "0" }));
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uiconfig::{ChannelType, DataPoint, Function};
    use crate::universe::EMPTY_UNIVERSE;
    use proptest::prelude::*;

    fn rgb_table(auto_on_off: bool) -> ChannelTable {
        let mut table = ChannelTable::new(auto_on_off);
        table
            .add_function(&Function {
                uid: "lamp".to_string(),
                channel_type: ChannelType::DimmerRgbw,
                display_name: "Lamp".to_string(),
                function_type: String::new(),
                data_points: ["Red", "OnOff", "Green", "Blue"]
                    .iter()
                    .map(|n| DataPoint {
                        name: n.to_string(),
                        uid: format!("lamp.{}", n.to_lowercase()),
                    })
                    .collect(),
            })
            .unwrap();
        table
            .add_function(&Function {
                uid: "spot".to_string(),
                channel_type: ChannelType::Dimmer,
                display_name: "Spot".to_string(),
                function_type: String::new(),
                data_points: vec![DataPoint {
                    name: "Brightness".to_string(),
                    uid: "spot.bri".to_string(),
                }],
            })
            .unwrap();
        table
    }

    fn values(body: &ValueBody) -> Vec<(&str, &str)> {
        body.values
            .iter()
            .map(|v| (v.uid.as_str(), v.value.as_str()))
            .collect()
    }

    #[test]
    fn test_scaling_truncates() {
        assert_eq!(dmx_to_percent(0), 0);
        assert_eq!(dmx_to_percent(1), 0);
        assert_eq!(dmx_to_percent(2), 0);
        assert_eq!(dmx_to_percent(3), 1);
        assert_eq!(dmx_to_percent(128), 50);
        assert_eq!(dmx_to_percent(254), 99);
        assert_eq!(dmx_to_percent(255), 100);
    }

    #[test]
    fn test_changed_channels_in_offset_order() {
        let table = rgb_table(false);
        let current = EMPTY_UNIVERSE;
        let mut target = EMPTY_UNIVERSE;
        target[4] = 255;
        target[0] = 128;

        let body = diff(&table, &current, &target).unwrap();
        assert_eq!(
            values(&body),
            vec![("lamp.red", "50"), ("spot.bri", "100")]
        );
        assert_eq!(table.channel(1).unwrap().uid, "lamp.onoff");
    }

    #[test]
    fn test_unassigned_slots_are_ignored() {
        let table = rgb_table(true);
        let current = EMPTY_UNIVERSE;
        let mut target = EMPTY_UNIVERSE;
        target[4] = 255;
        target[511] = 1;

        assert!(diff(&table, &current, &target).is_none());
    }

    #[test]
    fn test_group_not_emitted_for_unrelated_change() {
        let table = rgb_table(true);
        let mut current = EMPTY_UNIVERSE;
        current[0] = 10;
        let mut target = current;
        target[3] = 200;

        let body = diff(&table, &current, &target).unwrap();
        assert_eq!(values(&body), vec![("spot.bri", "78")]);
    }

    #[test]
    fn test_group_turns_on() {
        let table = rgb_table(true);
        let current = EMPTY_UNIVERSE;
        let mut target = EMPTY_UNIVERSE;
        target[1] = 1;

        let body = diff(&table, &current, &target).unwrap();
        assert_eq!(
            values(&body),
            vec![("lamp.green", "0"), ("lamp.onoff", "1")]
        );
    }

    #[test]
    fn test_group_stays_on_while_any_member_lit() {
        let table = rgb_table(true);
        let mut current = EMPTY_UNIVERSE;
        current[0] = 255;
        current[2] = 255;
        let mut target = current;
        target[0] = 0;

        let body = diff(&table, &current, &target).unwrap();
        assert_eq!(values(&body), vec![("lamp.red", "0"), ("lamp.onoff", "1")]);
    }

    #[test]
    fn test_group_turns_off_when_all_members_dark() {
        let table = rgb_table(true);
        let mut current = EMPTY_UNIVERSE;
        current[0] = 255;
        current[2] = 40;
        let target = EMPTY_UNIVERSE;

        let body = diff(&table, &current, &target).unwrap();
        assert_eq!(
            values(&body),
            vec![("lamp.red", "0"), ("lamp.blue", "0"), ("lamp.onoff", "0")]
        );
    }

    proptest! {
        #[test]
        fn prop_equal_snapshots_produce_nothing(data in prop::collection::vec(any::<u8>(), 512)) {
            let table = rgb_table(true);
            let mut snapshot = EMPTY_UNIVERSE;
            snapshot.copy_from_slice(&data);
            prop_assert!(diff(&table, &snapshot, &snapshot).is_none());
        }

        #[test]
        fn prop_changes_beyond_cursor_produce_nothing(
            data in prop::collection::vec(any::<u8>(), 512),
            noise in prop::collection::vec(any::<u8>(), 512),
        ) {
            let table = rgb_table(true);
            let mut current = EMPTY_UNIVERSE;
            current.copy_from_slice(&data);
            let mut target = current;
            let cursor = table.cursor();
            target[cursor..].copy_from_slice(&noise[cursor..]);
            prop_assert!(diff(&table, &current, &target).is_none());
        }

        #[test]
        fn prop_one_value_per_changed_channel(
            current in prop::collection::vec(any::<u8>(), 4),
            target in prop::collection::vec(any::<u8>(), 4),
        ) {
            let table = rgb_table(false);
            let mut a = EMPTY_UNIVERSE;
            let mut b = EMPTY_UNIVERSE;
            a[..4].copy_from_slice(&current);
            b[..4].copy_from_slice(&target);

            let expected = current.iter().zip(&target).filter(|(x, y)| x != y).count();
            let got = diff(&table, &a, &b).map(|body| body.len()).unwrap_or(0);
            prop_assert_eq!(got, expected);
        }
    }
}
