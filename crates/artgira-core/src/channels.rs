//! DMX channel table
//!
//! Maps automation data points onto the 512 slots of one universe. Channels
//! are allocated in encounter order and never move once assigned, so the
//! offset of a channel is also its index in the table.

use serde::{Deserialize, Serialize};

use crate::uiconfig::{DataPoint, Function};
use crate::{error::CoreError, Result};

/// Number of slots in one universe
pub const UNIVERSE_SIZE: usize = 512;

/// Name of the data point aggregated into an [`OnOffGroup`]
pub const ON_OFF: &str = "OnOff";

/// One addressable byte slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// 0-based slot (0-511)
    pub offset: usize,
    /// `<function>/<data point>`
    pub name: String,
    /// Data point identifier the slot is written to
    pub uid: String,
    /// Upper bound of the raw range
    pub max: u8,
}

/// A function mapped onto contiguous channels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub name: String,
    pub uid: String,
    /// Offset of the first channel
    pub offset: usize,
    pub channels: Vec<Channel>,
}

/// A derived on/off data point driven by several channels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnOffGroup {
    /// The `OnOff` data point identifier
    pub uid: String,
    /// Offsets of the channels whose state determines the value
    pub channels: Vec<usize>,
}

/// Channel layout of the universe
#[derive(Debug, Clone, Default)]
pub struct ChannelTable {
    // index == offset; len() is the allocation cursor
    channels: Vec<Channel>,
    on_off: Vec<OnOffGroup>,
    auto_on_off: bool,
}

impl ChannelTable {
    /// Create an empty table
    pub fn new(auto_on_off: bool) -> Self {
        Self {
            channels: Vec::with_capacity(UNIVERSE_SIZE),
            on_off: Vec::new(),
            auto_on_off,
        }
    }

    /// Map every data point of `function` onto the next free slots.
    ///
    /// With auto on/off enabled an `OnOff` data point gets no slot; it
    /// becomes the target of an [`OnOffGroup`] over the function's other
    /// channels instead.
    pub fn add_function(&mut self, function: &Function) -> Result<Fixture> {
        let needed = function
            .data_points
            .iter()
            .filter(|dp| !self.is_on_off(dp))
            .count();
        if self.cursor() + needed > UNIVERSE_SIZE {
            return Err(CoreError::UniverseFull(function.display_name.clone()));
        }

        let first = self.cursor();
        let mut channels = Vec::with_capacity(needed);
        let mut on_off_uid = None;

        for dp in &function.data_points {
            if self.is_on_off(dp) {
                on_off_uid = Some(dp.uid.clone());
                continue;
            }
            channels.push(self.allocate(function, dp));
        }

        if let Some(uid) = on_off_uid {
            self.on_off.push(OnOffGroup {
                uid,
                channels: channels.iter().map(|c| c.offset).collect(),
            });
        }

        Ok(Fixture {
            name: function.display_name.clone(),
            uid: function.uid.clone(),
            offset: first,
            channels,
        })
    }

    fn is_on_off(&self, dp: &DataPoint) -> bool {
        self.auto_on_off && dp.name == ON_OFF
    }

    fn allocate(&mut self, function: &Function, dp: &DataPoint) -> Channel {
        let channel = Channel {
            offset: self.cursor(),
            name: format!("{}/{}", function.display_name, dp.name),
            uid: dp.uid.clone(),
            max: u8::MAX,
        };
        self.channels.push(channel.clone());
        channel
    }

    /// Next free offset; slots at or beyond it are unassigned
    pub fn cursor(&self) -> usize {
        self.channels.len()
    }

    /// Channel at `offset`, if assigned
    pub fn channel(&self, offset: usize) -> Option<&Channel> {
        self.channels.get(offset)
    }

    /// Assigned channels in offset order
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn on_off_groups(&self) -> &[OnOffGroup] {
        &self.on_off
    }

    pub fn auto_on_off(&self) -> bool {
        self.auto_on_off
    }

    /// Operator listing, one line per channel with 1-based DMX addresses
    pub fn channel_listing(&self, sub_uni: u8) -> Vec<String> {
        self.channels
            .iter()
            .map(|ch| format!("CH {}.{:3} [{:>4}] {}", sub_uni, ch.offset + 1, ch.uid, ch.name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uiconfig::ChannelType;

    fn function(uid: &str, points: &[(&str, &str)]) -> Function {
        Function {
            uid: uid.to_string(),
            channel_type: ChannelType::DimmerRgbw,
            display_name: format!("Fn {}", uid),
            function_type: String::new(),
            data_points: points
                .iter()
                .map(|(name, uid)| DataPoint {
                    name: name.to_string(),
                    uid: uid.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_offsets_follow_encounter_order() {
        let mut table = ChannelTable::new(false);
        let a = table
            .add_function(&function("a", &[("Brightness", "a1")]))
            .unwrap();
        let b = table
            .add_function(&function("b", &[("Red", "b1"), ("Green", "b2")]))
            .unwrap();

        assert_eq!(a.offset, 0);
        assert_eq!(b.offset, 1);
        assert_eq!(table.cursor(), 3);
        for (i, ch) in table.channels().iter().enumerate() {
            assert_eq!(ch.offset, i);
        }
        assert_eq!(table.channel(2).unwrap().uid, "b2");
        assert_eq!(table.channel(2).unwrap().name, "Fn b/Green");
        assert!(table.channel(3).is_none());
    }

    #[test]
    fn test_on_off_gets_channel_when_disabled() {
        let mut table = ChannelTable::new(false);
        table
            .add_function(&function("a", &[("OnOff", "a0"), ("Brightness", "a1")]))
            .unwrap();

        assert_eq!(table.cursor(), 2);
        assert!(table.on_off_groups().is_empty());
    }

    #[test]
    fn test_on_off_group_collects_remaining_channels() {
        let mut table = ChannelTable::new(true);
        table
            .add_function(&function("x", &[("Brightness", "x1")]))
            .unwrap();
        let fixture = table
            .add_function(&function(
                "a",
                &[("Red", "a1"), ("OnOff", "a0"), ("Green", "a2"), ("Blue", "a3")],
            ))
            .unwrap();

        assert_eq!(fixture.offset, 1);
        assert_eq!(fixture.channels.len(), 3);
        assert_eq!(table.cursor(), 4);
        assert_eq!(
            table.on_off_groups(),
            &[OnOffGroup {
                uid: "a0".to_string(),
                channels: vec![1, 2, 3],
            }]
        );
    }

    #[test]
    fn test_no_group_without_on_off_point() {
        let mut table = ChannelTable::new(true);
        table
            .add_function(&function("a", &[("Brightness", "a1")]))
            .unwrap();
        assert!(table.on_off_groups().is_empty());
    }

    #[test]
    fn test_universe_full() {
        let mut table = ChannelTable::new(false);
        let points: Vec<(String, String)> = (0..UNIVERSE_SIZE)
            .map(|i| (format!("P{}", i), format!("u{}", i)))
            .collect();
        let refs: Vec<(&str, &str)> = points
            .iter()
            .map(|(n, u)| (n.as_str(), u.as_str()))
            .collect();
        table.add_function(&function("big", &refs)).unwrap();
        assert_eq!(table.cursor(), UNIVERSE_SIZE);

        let err = table
            .add_function(&function("more", &[("Brightness", "m1")]))
            .unwrap_err();
        assert!(matches!(err, CoreError::UniverseFull(_)));
        assert_eq!(table.cursor(), UNIVERSE_SIZE);
    }

    #[test]
    fn test_channel_listing() {
        let mut table = ChannelTable::new(false);
        table
            .add_function(&function("a", &[("Brightness", "a1")]))
            .unwrap();

        assert_eq!(table.channel_listing(3), vec!["CH 3.  1 [  a1] Fn a/Brightness"]);
    }
}
