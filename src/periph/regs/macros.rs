/// Declares word-wide registers of one peripheral page.
macro_rules! registers {
    ($peripheral:ident { $($(#[$meta:meta])* $name:ident = $offset:literal),* $(,)? }) => {
        $(
            $(#[$meta])*
            pub const $name: Register = Register::new(Peripheral::$peripheral, $offset);
        )*
    };
}

/// Declares a register split over two banks (pins 0..=31 and 32..=53).
///
/// Generates `NAME0`, `NAME1` and the bank array `NAME`.
macro_rules! banked {
    (
        $peripheral:ident {
            $($(#[$meta:meta])* $name:ident = [$bank0:literal, $bank1:literal]),* $(,)?
        }
    ) => {
        paste::paste! {
            $(
                #[doc = "Bank 0 (pins 0..=31) of [`" $name "`]."]
                pub const [<$name 0>]: Register = Register::new(Peripheral::$peripheral, $bank0);
                #[doc = "Bank 1 (pins 32..=53) of [`" $name "`]."]
                pub const [<$name 1>]: Register = Register::new(Peripheral::$peripheral, $bank1);
                $(#[$meta])*
                pub const $name: [Register; 2] = [[<$name 0>], [<$name 1>]];
            )*
        }
    };
}

/// Declares the control/divisor pair of clock manager generators.
///
/// Generates `CM_<NAME>CTL` at the given offset and `CM_<NAME>DIV` right after it.
macro_rules! clock_pairs {
    ($($name:ident = $ctl:literal),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = "Control register of the `" $name "` clock generator."]
                pub const [<CM_ $name CTL>]: Register = Register::new(Peripheral::Clock, $ctl);
                #[doc = "Divisor register of the `" $name "` clock generator."]
                pub const [<CM_ $name DIV>]: Register = Register::new(Peripheral::Clock, $ctl + 4);
            )*
        }
    };
}

pub(super) use banked;
pub(super) use clock_pairs;
pub(super) use registers;
