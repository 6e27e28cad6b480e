use crate::model::{Color, ElementType, Id};

document! {
    Button in "button" as "button" {
        is_link: bool,
        link: String,
        display_text: String,
        font_size: String,
        attributes: Id,
    }
}

document! {
    Text in "text" as "text" {
        is_function: bool,
        display_text: String,
        font_size: String,
        generic_object: String,
        function: String,
        attributes: Id,
    }
}

document! {
    Icon in "icon" as "icon" {
        aria_label: String,
        attributes: Id,
    }
}

document! {
    Image in "image" as "image" {
        source: String,
        alt: String,
        attributes: Id,
    }
}

document! {
    Badge in "badge" as "badge" {
        color: Color,
    }
}

document! {
    BadgeType in "badge_type" as "badgeType" {
        status: String,
        #[serde(rename = "type")]
        kind: Color,
        attributes: Id,
        badge_type: Id,
    }
}

document! {
    /// How a single cell or label renders its value.
    DisplayAtt in "display_att" as "displayAtt" {
        name: String,
        #[serde(rename = "type")]
        kind: ElementType,
        spacing: Id,
        attributes: Id,
        text: Id,
        badge: Id,
        icon: Id,
        image: Id,
        badge_types: Vec<Id>,
        display_att: Id,
    }
}
