// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

use serde::de::Visitor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;

macro_rules! catalog_id {
    ($name:ident) => {
        #[repr(transparent)]
        #[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash)]
        pub struct $name(pub u64);

        impl Deref for $name {
            type Target = u64;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl PartialEq<u64> for $name {
            fn eq(&self, other: &u64) -> bool {
                self.0.eq(other)
            }
        }

        impl From<$name> for u64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_u64(self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<$name, D::Error>
            where
                D: Deserializer<'de>,
            {
                struct U64Visitor;

                impl Visitor<'_> for U64Visitor {
                    type Value = $name;

                    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                        formatter.write_str("an unsigned 64-bit number")
                    }

                    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                        Ok($name(value))
                    }
                }

                deserializer.deserialize_u64(U64Visitor)
            }
        }
    };
}

catalog_id!(SchemaId);
catalog_id!(TableId);
catalog_id!(ColumnId);
catalog_id!(KeyId);
catalog_id!(AuthId);
