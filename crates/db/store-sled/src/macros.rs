/// Names of the sled trees backing a database.
///
/// Trees hold raw bytes, each table's key and value layout lives next to its
/// definition.
pub trait TreeSchema {
    const TREE_NAME: &'static str;
}

#[macro_export]
macro_rules! define_table {
    ($(#[$docs:meta])+ ( $table_name:ident )) => {
        $(#[$docs])+
        #[derive(Clone, Copy, Debug, Default)]
        pub(crate) struct $table_name;

        impl $crate::macros::TreeSchema for $table_name {
            const TREE_NAME: &'static str = ::core::stringify!($table_name);
        }

        impl ::std::fmt::Display for $table_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::core::write!(f, "{}", stringify!($table_name))
            }
        }
    };
}

#[macro_export]
macro_rules! sled_db_test_setup {
    ($db_type:ty, $test_macro:ident) => {
        $crate::sled_db_test_setup!($db_type, $test_macro, $crate::SledDbConfig::test());
    };
    ($db_type:ty, $test_macro:ident, $config:expr) => {
        fn setup_db() -> $db_type {
            let db = sled::Config::new().temporary(true).open().unwrap();
            <$db_type>::new(db, $config).unwrap()
        }

        $test_macro!(setup_db());
    };
}

#[macro_export]
macro_rules! define_sled_database {
    (
        $(#[$meta:meta])*
        pub struct $db_name:ident {
            $($vis:vis $field:ident: $schema:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $db_name {
            $(
                $vis $field: sled::Tree,
            )*
            config: $crate::SledDbConfig,
        }

        impl $db_name {
            pub fn new(db: sled::Db, config: $crate::SledDbConfig) -> overseer_db_types::DbResult<Self> {
                Ok(Self {
                    $(
                        $field: db
                            .open_tree(<$schema as $crate::macros::TreeSchema>::TREE_NAME)
                            .map_err($crate::utils::to_db_error)?,
                    )*
                    config,
                })
            }
        }
    };
}
