use std::fmt;
use std::hash::{Hash, Hasher};

use super::sealed::Stored;
use super::{Entity, Handle, PageGraph};
use crate::model::{self, Color, ElementType, Id};

/// Declares a node type.
///
/// `scalars` and `refs` are public fields. `sets` (owning collections) and
/// `back_refs` (inverse sides) only have getters here; they are written by
/// the relation operations.
macro_rules! node {
    (
        $(#[$meta:meta])*
        $name:ident in $arena:ident {
            scalars { $($scalar:ident : $sty:ty),* $(,)? }
            refs { $($rf:ident : $rty:ident),* $(,)? }
            sets { $($set:ident : $setty:ident),* $(,)? }
            back_refs { $($back:ident : $backty:ident),* $(,)? }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            pub(super) id: Option<Id>,
            $(pub $scalar: Option<$sty>,)*
            $(pub $rf: Option<Handle<$rty>>,)*
            $(pub(super) $set: Vec<Handle<$setty>>,)*
            $(pub(super) $back: Option<Handle<$backty>>,)*
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            $(
                pub fn $set(&self) -> &[Handle<$setty>] {
                    &self.$set
                }
            )*

            $(
                pub fn $back(&self) -> Option<Handle<$backty>> {
                    self.$back
                }
            )*
        }

        impl Stored for $name {
            fn arena(graph: &PageGraph) -> &Vec<Self> {
                &graph.$arena
            }

            fn arena_mut(graph: &mut PageGraph) -> &mut Vec<Self> {
                &mut graph.$arena
            }

            fn assign_id(&mut self, id: Id) {
                self.id = Some(id);
            }
        }

        impl Entity for $name {
            type Document = model::$name;

            fn id(&self) -> Option<&Id> {
                self.id.as_ref()
            }

            #[allow(unused_variables)]
            fn to_document(&self, graph: &PageGraph) -> model::$name {
                model::$name {
                    id: self.id.clone(),
                    $($scalar: self.$scalar.clone(),)*
                    $($rf: graph.id_of(self.$rf),)*
                    $(
                        $set: Some(
                            self.$set
                                .iter()
                                .filter_map(|member| graph.id_of(Some(*member)))
                                .collect(),
                        ),
                    )*
                    $($back: graph.id_of(self.$back),)*
                }
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                if std::ptr::eq(self, other) {
                    return true;
                }
                matches!((&self.id, &other.id), (Some(a), Some(b)) if a == b)
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                stringify!($name).hash(state);
            }
        }

        /// Identifier and scalar fields only.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("id", &self.id)
                    $(.field(stringify!($scalar), &self.$scalar))*
                    .finish()
            }
        }
    };
}

node! {
    Attributes in attributes {
        scalars { class_name: String }
        refs {}
        sets {}
        back_refs {}
    }
}

node! {
    Spacing in spacings {
        scalars { class_name: String }
        refs {}
        sets {
            margins: ObjectContainingString,
            paddings: ObjectContainingString,
        }
        back_refs {}
    }
}

node! {
    ObjectContainingString in object_containing_strings {
        scalars { name: String }
        refs { json: Page }
        sets {}
        back_refs {
            permissions: TabelValues,
            permissions1: Label,
            json1: Spacing,
            json2: Spacing,
        }
    }
}

node! {
    Button in buttons {
        scalars {
            is_link: bool,
            link: String,
            display_text: String,
            font_size: String,
        }
        refs { attributes: Attributes }
        sets {}
        back_refs {}
    }
}

node! {
    Text in texts {
        scalars {
            is_function: bool,
            display_text: String,
            font_size: String,
            generic_object: String,
            function: String,
        }
        refs { attributes: Attributes }
        sets {}
        back_refs {}
    }
}

node! {
    Icon in icons {
        scalars { aria_label: String }
        refs { attributes: Attributes }
        sets {}
        back_refs {}
    }
}

node! {
    Image in images {
        scalars { source: String, alt: String }
        refs { attributes: Attributes }
        sets {}
        back_refs {}
    }
}

node! {
    Badge in badges {
        scalars { color: Color }
        refs {}
        sets {}
        back_refs {}
    }
}

node! {
    BadgeType in badge_types {
        scalars { status: String, kind: Color }
        refs { attributes: Attributes }
        sets {}
        back_refs { badge_type: DisplayAtt }
    }
}

node! {
    DisplayAtt in display_atts {
        scalars { name: String, kind: ElementType }
        refs {
            spacing: Spacing,
            attributes: Attributes,
            text: Text,
            badge: Badge,
            icon: Icon,
            image: Image,
        }
        sets { badge_types: BadgeType }
        back_refs { display_att: TabelValues }
    }
}

node! {
    Label in labels {
        scalars {}
        refs {
            display_att: DisplayAtt,
            spacing: Spacing,
            text: Text,
            icon: Icon,
        }
        sets { object_containing_strings: ObjectContainingString }
        back_refs { labels: Head }
    }
}

node! {
    Head in heads {
        scalars {}
        refs { attributes: Attributes }
        sets { labels: Label }
        back_refs {}
    }
}

node! {
    TabelValues in tabel_values {
        scalars {}
        refs { attributes: Attributes }
        sets {
            object_containing_strings: ObjectContainingString,
            display_atts: DisplayAtt,
        }
        back_refs { table_values: Body }
    }
}

node! {
    Body in bodies {
        scalars {}
        refs { attributes: Attributes }
        sets { tabel_values: TabelValues }
        back_refs {}
    }
}

node! {
    Table in tables {
        scalars { generic_object: String }
        refs {
            attributes: Attributes,
            body: Body,
            head: Head,
        }
        sets {}
        back_refs {}
    }
}

node! {
    FormWrap in form_wraps {
        scalars {}
        refs {}
        sets {}
        back_refs {}
    }
}

node! {
    /// Flex container; owns the top-level elements of a page.
    FlexBox in flex_boxes {
        scalars { justify_content: String }
        refs {
            spacing: Spacing,
            attributes: Attributes,
            page: Page,
        }
        sets { elements: Elements }
        back_refs {}
    }
}

node! {
    /// Renderable node of the element tree. `elements` holds the children and
    /// `element` the parent; a root element has no parent and is attached to
    /// a flex box through `flexbox` instead.
    Elements in elements {
        scalars { kind: ElementType }
        refs {
            spacing: Spacing,
            attributes: Attributes,
            button: Button,
            text: Text,
            table: Table,
            form: FormWrap,
            badge: Badge,
            icon: Icon,
            image: Image,
        }
        sets { elements: Elements }
        back_refs {
            element: Elements,
            flexbox: FlexBox,
        }
    }
}

node! {
    Page in pages {
        scalars {
            name: String,
            description: String,
            model_id: String,
            page_id: i32,
            kind: String,
            full_screen: bool,
            history: String,
        }
        refs {}
        sets {}
        back_refs {}
    }
}
