/*!
    Encoded packet type.
*/

use std::time::Duration;

use crate::{MediaDuration, Pts, Rational};

/**
    An encoded video packet read from a container.

    Packets own their payload, so they stay valid independently of the
    demuxer that produced them.
*/
#[derive(Clone)]
pub struct Packet {
    /// Encoded payload.
    pub data: Vec<u8>,
    /// Presentation timestamp in time base units.
    pub pts: Option<Pts>,
    /// Decode timestamp in time base units.
    pub dts: Option<Pts>,
    /// Packet duration in time base units.
    pub duration: MediaDuration,
    /// Time base for timestamps.
    pub time_base: Rational,
    /// Whether this packet starts a keyframe.
    pub is_keyframe: bool,
}

impl Packet {
    /**
        Create a new packet.
    */
    pub fn new(
        data: Vec<u8>,
        pts: Option<Pts>,
        dts: Option<Pts>,
        duration: MediaDuration,
        time_base: Rational,
        is_keyframe: bool,
    ) -> Self {
        Self {
            data,
            pts,
            dts,
            duration,
            time_base,
            is_keyframe,
        }
    }

    /**
        Presentation time as wall-clock time, if the packet carries a timestamp.
    */
    pub fn presentation_time(&self) -> Option<Duration> {
        self.pts.and_then(|pts| pts.to_duration(self.time_base))
    }
}

impl std::fmt::Debug for Packet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Packet")
            .field("data_len", &self.data.len())
            .field("pts", &self.pts)
            .field("dts", &self.dts)
            .field("is_keyframe", &self.is_keyframe)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packet_presentation_time() {
        let packet = Packet::new(
            vec![0; 16],
            Some(Pts(50)),
            Some(Pts(48)),
            MediaDuration(1),
            Rational::new(1, 25),
            false,
        );
        assert_eq!(packet.presentation_time(), Some(Duration::from_secs(2)));
    }
}
