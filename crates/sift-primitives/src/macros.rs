#[macro_export]
macro_rules! value_kind_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (
                Null,
                "null",
                supports_ordering = false,
                supports_parity = false
            ),
            (
                Bool,
                "bool",
                supports_ordering = false,
                supports_parity = false
            ),
            (
                Number,
                "number",
                supports_ordering = true,
                supports_parity = true
            ),
            (
                Text,
                "text",
                supports_ordering = true,
                supports_parity = false
            ),
            (
                List,
                "list",
                supports_ordering = false,
                supports_parity = false
            ),
            (
                Record,
                "record",
                supports_ordering = false,
                supports_parity = false
            ),
        }
    };
}

#[macro_export]
macro_rules! value_kind_registry {
    ($macro:ident) => {
        $crate::value_kind_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::value_kind_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $kind:expr; @entries $( ($variant:ident, $label:literal, supports_ordering = $supports_ordering:expr, supports_parity = $supports_parity:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::ValueKind::$variant => $crate::ValueKindMetadata {
                    label: $label,
                    supports_ordering: $supports_ordering,
                    supports_parity: $supports_parity,
                },
            )*
        }
    };
}

macro_rules! all_kinds_from_registry {
    ( @entries $( ($variant:ident, $label:literal, supports_ordering = $supports_ordering:expr, supports_parity = $supports_parity:expr) ),* $(,)? ) => {
        [ $( $crate::ValueKind::$variant ),* ]
    };
}
