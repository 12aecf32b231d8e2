//! `define_port_error!` builds the error enums returned by driven ports.
//!
//! Each variant gets a snake_case constructor taking `impl Into<T>` for its
//! fields, so adapters can write `StoreError::query(err.to_string())`.

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
