//! End-to-end workflow tests: init a workspace, load a graph document,
//! persist it, and answer queries against the stored graph.

use tempfile::TempDir;
use waypoint::app::App;
use waypoint::commands::init;
use waypoint::cycles::find_cycles;
use waypoint::domain::{Answer, Graph, GraphId, NodeId, QueryBatch};
use waypoint::engine::QueryEngine;
use waypoint::index::AdjacencyIndex;
use waypoint::validate::build_graph;

const ROUTES_XML: &str = r#"
<graph>
  <id>routes</id>
  <name>Test routes</name>
  <nodes>
    <node><id>a</id><name>Alpha</name></node>
    <node><id>b</id><name>Bravo</name></node>
    <node><id>c</id><name>Charlie</name></node>
  </nodes>
  <edges>
    <node><id>e1</id><from>a</from><to>b</to><cost>1</cost></node>
    <node><id>e2</id><from>b</from><to>c</to><cost>2</cost></node>
    <node><id>e3</id><from>a</from><to>c</to><cost>5</cost></node>
    <node><id>e4</id><from>c</from><to>a</to><cost>1</cost></node>
  </edges>
</graph>
"#;

/// Creates an initialized workspace with the fixture graph already stored.
async fn workspace_with_routes() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    init::init(temp.path()).await.expect("init should succeed");

    let mut app = App::from_directory(temp.path()).await.unwrap();
    let document = roxmltree::Document::parse(ROUTES_XML).unwrap();
    let graph = build_graph(&document).unwrap();
    app.store_mut().save_graph(&graph).await.unwrap();
    app.save().await.unwrap();

    temp
}

/// Reopens the workspace and fetches the stored fixture graph.
async fn reopen_routes(dir: &TempDir) -> Graph {
    let app = App::from_directory(dir.path()).await.unwrap();
    app.store()
        .load_graph(&GraphId::new("routes"))
        .await
        .unwrap()
        .expect("graph should be stored")
}

#[tokio::test]
async fn load_then_reopen_round_trips() {
    let workspace = workspace_with_routes().await;

    // A fresh App reads the persisted store from disk.
    let graph = reopen_routes(&workspace).await;

    assert_eq!(graph.name, "Test routes");
    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.edges.len(), 4);
}

#[tokio::test]
async fn query_batch_against_stored_graph() {
    let workspace = workspace_with_routes().await;
    let graph = reopen_routes(&workspace).await;

    let batch: QueryBatch = serde_json::from_str(
        r#"{
            "queries": [
                {"cheapest": {"start": "a", "end": "c"}},
                {"paths": {"start": "a", "end": "c"}},
                {"paths": {"start": "a", "end": "missing"}},
                {"widest": {"start": "a", "end": "c"}}
            ]
        }"#,
    )
    .unwrap();

    let index = AdjacencyIndex::build(&graph);
    let mut engine = QueryEngine::new(&index);
    let answers = engine.run_batch(&batch);

    assert_eq!(answers.len(), 4);

    let Answer::Cheapest { path: Some(path), .. } = &answers[0] else {
        panic!("expected a cheapest answer with a path");
    };
    assert_eq!(
        path.nodes,
        vec![NodeId::new("a"), NodeId::new("b"), NodeId::new("c")]
    );
    assert_eq!(path.cost, 3.0);

    let Answer::Paths { paths, .. } = &answers[1] else {
        panic!("expected a paths answer");
    };
    assert_eq!(paths.len(), 2);

    // Unknown endpoint is a no-route outcome, not an error.
    assert!(matches!(&answers[2], Answer::Paths { paths, .. } if paths.is_empty()));

    // Malformed entry fails alone.
    assert!(matches!(&answers[3], Answer::Invalid { .. }));

    // The two a->c queries share one all-paths computation.
    assert_eq!(engine.computations(), 2);
}

#[tokio::test]
async fn cycles_of_stored_graph() {
    let workspace = workspace_with_routes().await;
    let graph = reopen_routes(&workspace).await;

    let cycles = find_cycles(&AdjacencyIndex::build(&graph));

    // a->b->c->a and a->c->a, both anchored at "a".
    assert_eq!(cycles.len(), 2);
    for cycle in &cycles {
        assert_eq!(cycle.nodes.first(), cycle.nodes.last());
        assert_eq!(cycle.nodes[0], NodeId::new("a"));
    }
}

#[tokio::test]
async fn listing_reflects_saved_graphs() {
    let workspace = workspace_with_routes().await;

    let app = App::from_directory(workspace.path()).await.unwrap();
    let summaries = app.store().list_graphs().await.unwrap();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].id, GraphId::new("routes"));
    assert_eq!(summaries[0].nodes, 3);
    assert_eq!(summaries[0].edges, 4);
}

#[tokio::test]
async fn reloading_same_graph_id_keeps_the_original() {
    let workspace = workspace_with_routes().await;

    // A second load of the same document is a reported no-op.
    let mut app = App::from_directory(workspace.path()).await.unwrap();
    let document = roxmltree::Document::parse(ROUTES_XML).unwrap();
    let graph = build_graph(&document).unwrap();
    app.store_mut().save_graph(&graph).await.unwrap();
    app.save().await.unwrap();

    let summaries = app.store().list_graphs().await.unwrap();
    assert_eq!(summaries.len(), 1);
}
