use crate::model::Id;

document! {
    /// Shared CSS class list referenced by most other documents.
    Attributes in "attributes" as "attributes" {
        class_name: String,
    }
}

document! {
    Spacing in "spacing" as "spacing" {
        class_name: String,
        margins: Vec<Id>,
        paddings: Vec<Id>,
    }
}

document! {
    /// Named string value. Each of `permissions`, `permissions1`, `json1`
    /// and `json2` is the back-reference of exactly one owning collection.
    ObjectContainingString in "object_containing_string" as "objectContainingString" {
        name: String,
        json: Id,
        permissions: Id,
        permissions1: Id,
        json1: Id,
        json2: Id,
    }
}
