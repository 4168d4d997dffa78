//! Helper macro for declaring capability error enums.
//!
//! Each generated enum derives `thiserror::Error` and gains one snake-case
//! constructor per variant, so adapters can write
//! `IdentityProviderError::unreachable(err.to_string())` instead of spelling
//! out struct literals.

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
    define_port_error! {
        pub enum ProbeError {
            Offline => "capability offline",
            Refused { message: String } => "refused: {message}",
            Throttled { message: String, retry_after_secs: u64 } =>
                "throttled: {message} (retry in {retry_after_secs}s)",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(ProbeError::offline(), ProbeError::Offline);
        assert_eq!(ProbeError::offline().to_string(), "capability offline");
    }

    #[test]
    fn string_fields_accept_borrowed_input() {
        let err = ProbeError::refused("EMAIL_EXISTS");
        assert_eq!(err.to_string(), "refused: EMAIL_EXISTS");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = ProbeError::throttled("slow down", 30_u64);
        assert_eq!(err.to_string(), "throttled: slow down (retry in 30s)");
    }
}
