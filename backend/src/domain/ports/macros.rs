//! `define_port_error!`: generates a `thiserror` enum plus snake_case
//! constructors whose string fields accept anything `Into<String>`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum LookupError {
            Offline => "lookup offline",
            Missing { key: String } => "missing key: {key}",
            Stale { revision: u32 } => "stale revision {revision}",
            Rejected { key: String, status: u16 } => "rejected {key} with {status}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(LookupError::offline(), LookupError::Offline);
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = LookupError::missing("trip:1");
        assert_eq!(err.to_string(), "missing key: trip:1");
    }

    #[test]
    fn constructors_preserve_numeric_fields() {
        let err = LookupError::stale(7_u32);
        assert_eq!(err.to_string(), "stale revision 7");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = LookupError::rejected("trip:1", 409_u16);
        assert_eq!(err.to_string(), "rejected trip:1 with 409");
    }
}
