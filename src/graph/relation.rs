use super::sealed::Link;
use super::{
    BadgeType, Body, DisplayAtt, Elements, FlexBox, Handle, Head, Label, ObjectContainingString,
    PageGraph, Spacing, TabelValues,
};

/// A one-to-many relation whose owning collection maintains the children's
/// back-reference.
///
/// Implemented only by the marker types of this module.
pub trait OneToMany: Link {}

macro_rules! relation {
    (
        $(#[$meta:meta])*
        $name:ident: $parent:ident . $set:ident => $child:ident . $back:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl Link for $name {
            type Parent = $parent;
            type Child = $child;

            fn members(parent: &$parent) -> &Vec<Handle<$child>> {
                &parent.$set
            }

            fn members_mut(parent: &mut $parent) -> &mut Vec<Handle<$child>> {
                &mut parent.$set
            }

            fn back_ref(child: &$child) -> Option<Handle<$parent>> {
                child.$back
            }

            fn set_back_ref(child: &mut $child, parent: Option<Handle<$parent>>) {
                child.$back = parent;
            }
        }

        impl OneToMany for $name {}
    };
}

relation! {
    /// `Spacing.margins` / `ObjectContainingString.json1`
    SpacingMargins: Spacing.margins => ObjectContainingString.json1
}

relation! {
    /// `Spacing.paddings` / `ObjectContainingString.json2`
    SpacingPaddings: Spacing.paddings => ObjectContainingString.json2
}

relation! {
    TabelValuesObjectContainingStrings:
        TabelValues.object_containing_strings => ObjectContainingString.permissions
}

relation! {
    LabelObjectContainingStrings:
        Label.object_containing_strings => ObjectContainingString.permissions1
}

relation! {
    DisplayAttBadgeTypes: DisplayAtt.badge_types => BadgeType.badge_type
}

relation! {
    TabelValuesDisplayAtts: TabelValues.display_atts => DisplayAtt.display_att
}

relation! {
    HeadLabels: Head.labels => Label.labels
}

relation! {
    BodyTabelValues: Body.tabel_values => TabelValues.table_values
}

relation! {
    /// Root elements of a flex box.
    FlexBoxElements: FlexBox.elements => Elements.flexbox
}

relation! {
    /// Nesting of elements: parent `elements` / child `element`.
    ElementsChildren: Elements.elements => Elements.element
}

impl PageGraph {
    /// Replace the whole collection of `parent` for relation `R`.
    ///
    /// Every previous member loses its back-reference, then every new member
    /// points at `parent`. A member present in both collections ends up
    /// pointing at `parent`. Duplicates in `children` are kept once. `None`
    /// only clears the previous members and leaves the collection empty.
    pub fn assign<R: OneToMany>(
        &mut self,
        parent: Handle<R::Parent>,
        children: Option<Vec<Handle<R::Child>>>,
    ) {
        let previous = std::mem::take(R::members_mut(self.get_mut(parent)));
        for child in previous {
            R::set_back_ref(self.get_mut(child), None);
        }

        let Some(children) = children else {
            return;
        };

        let mut members: Vec<Handle<R::Child>> = Vec::with_capacity(children.len());
        for child in children {
            R::set_back_ref(self.get_mut(child), Some(parent));
            if !members.iter().any(|member| self.same(*member, child)) {
                members.push(child);
            }
        }
        *R::members_mut(self.get_mut(parent)) = members;
    }

    /// Add `child` to the collection of `parent` unless an equal node is
    /// already there, and point its back-reference at `parent`.
    ///
    /// A child that currently belongs to another parent is re-parented; the
    /// other parent's collection is not touched.
    pub fn add<R: OneToMany>(&mut self, parent: Handle<R::Parent>, child: Handle<R::Child>) {
        if !self.contains::<R>(parent, child) {
            R::members_mut(self.get_mut(parent)).push(child);
        }
        R::set_back_ref(self.get_mut(child), Some(parent));
    }

    /// Take the member equal to `child` out of the collection of `parent` and
    /// clear that member's back-reference. No-op when there is no such member.
    pub fn remove<R: OneToMany>(&mut self, parent: Handle<R::Parent>, child: Handle<R::Child>) {
        let position = R::members(self.get(parent))
            .iter()
            .position(|member| self.same(*member, child));
        let Some(position) = position else {
            return;
        };

        let removed = R::members_mut(self.get_mut(parent)).remove(position);
        R::set_back_ref(self.get_mut(removed), None);
    }

    /// Whether the collection of `parent` holds a node equal to `child`.
    pub fn contains<R: OneToMany>(&self, parent: Handle<R::Parent>, child: Handle<R::Child>) -> bool {
        R::members(self.get(parent))
            .iter()
            .any(|member| self.same(*member, child))
    }

    pub fn members<R: OneToMany>(&self, parent: Handle<R::Parent>) -> &[Handle<R::Child>] {
        R::members(self.get(parent))
    }

    /// The node `child`'s back-reference points at for relation `R`.
    pub fn parent_of<R: OneToMany>(&self, child: Handle<R::Child>) -> Option<Handle<R::Parent>> {
        R::back_ref(self.get(child))
    }
}
