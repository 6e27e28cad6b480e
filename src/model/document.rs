use crate::model::Id;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

/// A record stored on its own in the document store.
///
/// References to other documents are held as identifiers; the store never
/// joins across collections.
pub trait Document: Serialize + DeserializeOwned + Debug + Clone + Send + Sync + 'static {
    /// Name of the collection (or table partition) the document lives in.
    const COLLECTION: &'static str;
    /// Name used in alerts and error bodies.
    const ENTITY_NAME: &'static str;

    fn id(&self) -> Option<&Id>;

    fn set_id(&mut self, id: Id);

    /// Copy every field that is set on `patch` onto `self`, leaving the rest alone.
    fn merge(&mut self, patch: Self);
}

/// Declares a document struct whose fields are all optional, plus its
/// [`Document`] impl.
macro_rules! document {
    (
        $(#[$meta:meta])*
        $name:ident in $collection:literal as $entity:literal {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        pub struct $name {
            #[serde(skip_serializing_if = "Option::is_none")]
            pub id: Option<$crate::model::Id>,
            $(
                $(#[$fmeta])*
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl $crate::model::Document for $name {
            const COLLECTION: &'static str = $collection;
            const ENTITY_NAME: &'static str = $entity;

            fn id(&self) -> Option<&$crate::model::Id> {
                self.id.as_ref()
            }

            fn set_id(&mut self, id: $crate::model::Id) {
                self.id = Some(id);
            }

            #[allow(unused_variables)]
            fn merge(&mut self, patch: Self) {
                $(
                    if patch.$field.is_some() {
                        self.$field = patch.$field;
                    }
                )*
            }
        }
    };
}
