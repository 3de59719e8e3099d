//! Unit enums shared across records and instruction arguments.
//!
//! All encode as a single byte holding the variant index in declaration
//! order. Decoding rejects out-of-range tags.

use crate::codec::{Decoder, Encoder};
use crate::error::{DecodeError, DecodeErrorKind};

macro_rules! wire_enum {
    ($(#[$doc:meta])* $name:ident { $($(#[$vdoc:meta])* $variant:ident = $tag:expr),+ $(,)? }) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vdoc])* $variant = $tag,)+
        }

        impl $name {
            /// Variant for a raw tag byte, if in range.
            pub fn from_u8(value: u8) -> Option<Self> {
                match value {
                    $($tag => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// The wire tag byte.
            pub fn as_u8(self) -> u8 {
                self as u8
            }

            /// Read one variant tag from the cursor.
            ///
            /// # Errors
            /// Fails with `InvalidVariant` on an out-of-range tag.
            pub fn read(dec: &mut Decoder<'_>, field: &'static str) -> Result<Self, DecodeError> {
                let offset = dec.position();
                let value = dec.read_u8(field)?;
                Self::from_u8(value).ok_or(DecodeError {
                    field,
                    offset,
                    kind: DecodeErrorKind::InvalidVariant { value },
                })
            }

            /// Write the variant tag to the cursor.
            pub fn write(self, enc: &mut Encoder) {
                enc.write_u8(self.as_u8());
            }
        }
    };
}

wire_enum! {
    /// Direction of a position.
    Side {
        /// No position.
        #[default]
        None = 0,
        /// Long exposure.
        Long = 1,
        /// Short exposure.
        Short = 2,
    }
}

wire_enum! {
    /// What a position request does to the position.
    RequestChange {
        /// No change.
        #[default]
        None = 0,
        /// Open or grow the position.
        Increase = 1,
        /// Shrink or close the position.
        Decrease = 2,
    }
}

impl RequestChange {
    /// The textual form used as a PDA seed component.
    pub fn as_seed(self) -> &'static [u8] {
        match self {
            Self::None => b"none",
            Self::Increase => b"increase",
            Self::Decrease => b"decrease",
        }
    }
}

wire_enum! {
    /// How a request executes.
    RequestType {
        /// Execute at market.
        #[default]
        Market = 0,
        /// Execute when a trigger price is crossed.
        Trigger = 1,
    }
}

wire_enum! {
    /// Which oracle backs a custody.
    OracleType {
        /// No oracle.
        #[default]
        None = 0,
        /// Test oracle.
        Test = 1,
        /// Pyth price feed.
        Pyth = 2,
    }
}

wire_enum! {
    /// Price selection mode for oracle reads.
    PriceCalcMode {
        /// Use the conservative low price.
        #[default]
        Min = 0,
        /// Use the conservative high price.
        Max = 1,
        /// Ignore confidence, use the mid price.
        Ignore = 2,
    }
}

wire_enum! {
    /// Direction of a trade relative to pool exposure.
    TradePoolType {
        /// Trade grows pool exposure.
        #[default]
        Increase = 0,
        /// Trade shrinks pool exposure.
        Decrease = 1,
    }
}
