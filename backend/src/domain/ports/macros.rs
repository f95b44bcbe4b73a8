//! `define_port_error!` declares the error enum of each cookbook repository
//! port (users, catalogue, recipes, favorites, shopping lists, subscriptions,
//! short links) together with snake_case constructors, so Diesel adapters
//! write `RecipeRepositoryError::query(err.to_string())` and the port maps
//! `Connection` to 503 and `Query` to 500 in its `From<_> for Error` impl.

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
        pub enum PantryPortError {
            Missing { ingredient: String } => "missing {ingredient}",
            Short { grams: u32 } => "short by {grams} g",
            Spoiled { ingredient: String, days: u32 } => "{ingredient} spoiled {days} days ago",
            Closed => "pantry closed",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        assert_eq!(PantryPortError::missing("flour").to_string(), "missing flour");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        assert_eq!(PantryPortError::short(50_u32).to_string(), "short by 50 g");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = PantryPortError::spoiled("milk", 2_u32);
        assert_eq!(err.to_string(), "milk spoiled 2 days ago");
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(PantryPortError::closed(), PantryPortError::Closed);
    }
}
