use anyhow::{Context, Result};

use super::{
    Attributes, Badge, BadgeType, Body, Button, DisplayAtt, Elements, Entity, FlexBox, FormWrap,
    Head, Icon, Image, Label, ObjectContainingString, Page, PageGraph, Spacing, TabelValues, Table,
    Text,
};
use crate::model::Document;
use crate::store::DocumentStore;

macro_rules! for_each_entity {
    ($pass:ident($graph:expr, $store:expr)) => {{
        let mut saved = 0;
        saved += $pass::<Page, _>($graph, $store).await?;
        saved += $pass::<Attributes, _>($graph, $store).await?;
        saved += $pass::<Spacing, _>($graph, $store).await?;
        saved += $pass::<ObjectContainingString, _>($graph, $store).await?;
        saved += $pass::<Button, _>($graph, $store).await?;
        saved += $pass::<Text, _>($graph, $store).await?;
        saved += $pass::<Icon, _>($graph, $store).await?;
        saved += $pass::<Image, _>($graph, $store).await?;
        saved += $pass::<Badge, _>($graph, $store).await?;
        saved += $pass::<BadgeType, _>($graph, $store).await?;
        saved += $pass::<DisplayAtt, _>($graph, $store).await?;
        saved += $pass::<Label, _>($graph, $store).await?;
        saved += $pass::<Head, _>($graph, $store).await?;
        saved += $pass::<TabelValues, _>($graph, $store).await?;
        saved += $pass::<Body, _>($graph, $store).await?;
        saved += $pass::<Table, _>($graph, $store).await?;
        saved += $pass::<FormWrap, _>($graph, $store).await?;
        saved += $pass::<FlexBox, _>($graph, $store).await?;
        saved += $pass::<Elements, _>($graph, $store).await?;
        saved
    }};
}

/// Persist every node of `graph`.
///
/// Nodes without an identifier are saved first so the store assigns one;
/// then every node is written again with all references resolved to
/// identifiers. Nothing is deleted.
pub async fn save_graph<S: DocumentStore>(graph: &mut PageGraph, store: &S) -> Result<()> {
    let assigned = for_each_entity!(assign_identifiers(graph, store));
    let written = for_each_entity!(write_documents(graph, store));
    log::info!(
        "Saved page graph: {} new documents, {} documents written",
        assigned,
        written
    );
    Ok(())
}

async fn assign_identifiers<T: Entity, S: DocumentStore>(
    graph: &mut PageGraph,
    store: &S,
) -> Result<usize> {
    let mut assigned = 0;
    let handles: Vec<_> = graph.handles::<T>().collect();
    for handle in handles {
        if graph[handle].id().is_some() {
            continue;
        }

        let view: &PageGraph = graph;
        let document = view[handle].to_document(view);
        let saved = store.save(document).await?;
        let id = saved.id().cloned().with_context(|| {
            format!(
                "Store returned {} without an identifier",
                <T::Document as Document>::ENTITY_NAME
            )
        })?;
        graph.get_mut(handle).assign_id(id);
        assigned += 1;
    }
    Ok(assigned)
}

async fn write_documents<T: Entity, S: DocumentStore>(
    graph: &PageGraph,
    store: &S,
) -> Result<usize> {
    let mut written = 0;
    let handles: Vec<_> = graph.handles::<T>().collect();
    for handle in handles {
        let document = graph[handle].to_document(graph);
        store.save(document).await?;
        written += 1;
    }
    Ok(written)
}
