use crate::model::{ElementType, Id};

document! {
    /// Root of a rendered page.
    Page in "page" as "page" {
        name: String,
        description: String,
        model_id: String,
        page_id: i32,
        #[serde(rename = "type")]
        kind: String,
        full_screen: bool,
        history: String,
    }
}

document! {
    /// Flex container holding the top-level elements of a page.
    FlexBox in "flex_box" as "flexBox" {
        justify_content: String,
        spacing: Id,
        attributes: Id,
        elements: Vec<Id>,
        page: Id,
    }
}

document! {
    /// A renderable node. Elements nest: `elements` lists the children and
    /// `element` points back at the parent.
    Elements in "elements" as "elements" {
        #[serde(rename = "type")]
        kind: ElementType,
        spacing: Id,
        attributes: Id,
        button: Id,
        text: Id,
        table: Id,
        form: Id,
        badge: Id,
        icon: Id,
        image: Id,
        elements: Vec<Id>,
        element: Id,
        flexbox: Id,
    }
}

document! {
    FormWrap in "form_wrap" as "formWrap" {}
}
