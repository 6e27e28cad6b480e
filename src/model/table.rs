use crate::model::Id;

document! {
    Table in "table" as "table" {
        generic_object: String,
        attributes: Id,
        body: Id,
        head: Id,
    }
}

document! {
    Head in "head" as "head" {
        attributes: Id,
        labels: Vec<Id>,
    }
}

document! {
    Body in "body" as "body" {
        attributes: Id,
        tabel_values: Vec<Id>,
    }
}

document! {
    /// One row of table values.
    TabelValues in "tabel_values" as "tabelValues" {
        attributes: Id,
        object_containing_strings: Vec<Id>,
        display_atts: Vec<Id>,
        table_values: Id,
    }
}

document! {
    /// Column header; `labels` points back at the owning head.
    Label in "label" as "label" {
        display_att: Id,
        spacing: Id,
        text: Id,
        icon: Id,
        object_containing_strings: Vec<Id>,
        labels: Id,
    }
}
