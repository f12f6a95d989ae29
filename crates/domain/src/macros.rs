//! Display/FromStr conversions for the backend's wire enums
//!
//! The warehouse backend spells its enum values in upper case (`PENDIENTE`,
//! `EFECTIVO`, ...). This macro keeps the wire spelling in one place and
//! derives both directions from it.
//!
//! # Example
//!
//! ```rust
//! use partsdesk_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum DeliveryState {
//!     Pending,
//!     Shipped,
//! }
//!
//! impl_wire_enum_conversions!(DeliveryState {
//!     Pending => "PENDING",
//!     Shipped => "SHIPPED",
//! });
//!
//! assert_eq!(DeliveryState::Shipped.to_string(), "SHIPPED");
//! assert_eq!("pending".parse::<DeliveryState>(), Ok(DeliveryState::Pending));
//! ```

/// Implements `Display` and `FromStr` for a wire enum.
///
/// - `Display` writes the wire spelling verbatim.
/// - `FromStr` accepts the wire spelling in any ASCII case and reports the
///   enum name on failure.
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire spelling of this variant.
            pub const fn as_wire_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_wire_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
