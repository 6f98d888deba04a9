#![allow(unused_crate_dependencies)]

use graphql_import::{
    Definition, Document, DocumentProvider, Error, FetchError, ImportConfig, Importer, MemoryProvider, MergeConfig,
    UnresolvedReference, complete_pool,
};
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};

fn names(definitions: &[Definition]) -> Vec<&str> {
    definitions.iter().map(Definition::name).collect()
}

fn field_names<'a>(definitions: &'a [Definition], type_name: &str) -> Vec<&'a str> {
    definitions
        .iter()
        .find(|definition| definition.name() == type_name)
        .and_then(Definition::field_names)
        .unwrap_or_default()
}

#[tokio::test]
async fn imports_a_type_and_everything_it_references() {
    let provider = MemoryProvider::new()
        .with_document(
            "schema.graphql",
            indoc! {r#"
                # import User from "users.graphql"

                type Query {
                  me: User
                }
            "#},
        )
        .with_document(
            "users.graphql",
            indoc! {r#"
                type User {
                  id: ID!
                  posts: [Post!]!
                }

                type Post {
                  title: String
                  status: Status
                }

                enum Status { DRAFT PUBLISHED }

                type Unrelated { id: ID }
            "#},
        );

    let definitions = Importer::new(provider).import("schema.graphql").await.unwrap();

    assert_eq!(names(&definitions), ["Query", "User", "Post", "Status"]);

    // Completing an already complete pool adds nothing.
    let again = complete_pool(&definitions, definitions.clone(), Vec::new()).unwrap();
    assert_eq!(again, definitions);
}

#[tokio::test]
async fn importing_a_missing_type_names_it() {
    let provider = MemoryProvider::new()
        .with_document("schema.graphql", "# import Missing from \"types.graphql\"\ntype Query { a: Int }")
        .with_document("types.graphql", "type Present { id: ID }");

    let error = Importer::new(provider).import("schema.graphql").await.unwrap_err();

    let Error::UnresolvedReference(reference) = &error else {
        unreachable!("unexpected error: {error}");
    };

    assert_eq!(reference.missing_name(), "Missing");
    assert_eq!(error.to_string(), "Couldn't find type Missing in any of the schemas.");
}

#[tokio::test]
async fn unresolved_field_types_fail() {
    let provider = MemoryProvider::new().with_document("schema.graphql", "type Query { a: Nowhere }");

    let error = Importer::new(provider).import("schema.graphql").await.unwrap_err();

    assert!(matches!(
        error,
        Error::UnresolvedReference(UnresolvedReference::FieldType { ref field, ref type_name })
            if field == "a" && type_name == "Nowhere"
    ));
}

#[tokio::test]
async fn wildcard_import_of_a_later_document_is_narrowed_to_reachable_types() {
    let provider = MemoryProvider::new()
        .with_document(
            "schema.graphql",
            indoc! {r#"
                # import * from "types.graphql"
                type Query { a: A }
            "#},
        )
        .with_document(
            "types.graphql",
            indoc! {r#"
                type A { c: C }
                type B { id: ID }
                type C { id: ID }
            "#},
        );

    let definitions = Importer::new(provider).import("schema.graphql").await.unwrap();

    assert_eq!(names(&definitions), ["Query", "A", "C"]);
}

#[tokio::test]
async fn circular_imports_terminate() {
    let provider = MemoryProvider::new()
        .with_document(
            "a.graphql",
            indoc! {r#"
                # import B from "b.graphql"
                type A { b: B }
            "#},
        )
        .with_document(
            "b.graphql",
            indoc! {r#"
                # import A from "a.graphql"
                type B { a: A }
            "#},
        );

    let definitions = Importer::new(provider).import("a.graphql").await.unwrap();

    assert_eq!(names(&definitions), ["A", "B"]);
}

#[tokio::test]
async fn documents_importing_different_subsets_of_each_other() {
    let provider = MemoryProvider::new()
        .with_document(
            "a.graphql",
            indoc! {r#"
                # import B1 from "b.graphql"
                type A1 { b: B1 }
                type A2 { id: ID }
            "#},
        )
        .with_document(
            "b.graphql",
            indoc! {r#"
                # import A2 from "a.graphql"
                type B1 { a: A2 }
                type B2 { id: ID }
            "#},
        );

    let definitions = Importer::new(provider).import("a.graphql").await.unwrap();

    assert_eq!(names(&definitions), ["A1", "A2", "B1"]);
}

#[tokio::test]
async fn field_selectors_prune_the_imported_type() {
    let provider = MemoryProvider::new()
        .with_document(
            "schema.graphql",
            indoc! {r#"
                # import A.b from "a.graphql"
                type Query { a: A }
            "#},
        )
        .with_document("a.graphql", "type A { b: B c: C } type B { id: ID } type C { id: ID }");

    let definitions = Importer::new(provider).import("schema.graphql").await.unwrap();

    assert_eq!(names(&definitions), ["Query", "A", "B"]);
    assert_eq!(field_names(&definitions, "A"), ["b"]);
}

#[tokio::test]
async fn root_types_from_several_documents_are_combined() {
    let provider = MemoryProvider::new()
        .with_document(
            "schema.graphql",
            indoc! {r#"
                # import Query.users from "users.graphql"
                # import Query.*, Mutation.* from "posts.graphql"
            "#},
        )
        .with_document(
            "users.graphql",
            "type Query { users: [User] admins: [User] } type User { id: ID }",
        )
        .with_document(
            "posts.graphql",
            "type Query { posts: [Post] } type Mutation { publish(id: ID!): Post } type Post { id: ID }",
        );

    let definitions = Importer::new(provider).import("schema.graphql").await.unwrap();

    assert_eq!(names(&definitions), ["Query", "Mutation", "User", "Post"]);
    assert_eq!(field_names(&definitions, "Query"), ["users", "posts"]);
}

#[tokio::test]
async fn nested_relative_imports() {
    let provider = MemoryProvider::new()
        .with_document(
            "api/schema.graphql",
            indoc! {r#"
                # import Order from "orders/order.graphql"
                type Query { order: Order }
            "#},
        )
        .with_document(
            "api/orders/order.graphql",
            indoc! {r#"
                # import Money from "../shared/money.graphql"
                type Order { total: Money }
            "#},
        )
        .with_document("api/shared/money.graphql", "scalar Money");

    let definitions = Importer::new(provider).import("api/schema.graphql").await.unwrap();

    assert_eq!(names(&definitions), ["Query", "Order", "Money"]);
}

#[tokio::test]
async fn interfaces_pull_their_implementations_and_directives_their_definitions() {
    let provider = MemoryProvider::new()
        .with_document(
            "schema.graphql",
            indoc! {r#"
                # import Node from "nodes.graphql"
                type Query { node(id: ID!): Node }
            "#},
        )
        .with_document(
            "nodes.graphql",
            indoc! {r#"
                directive @cost(weight: Int!) on FIELD_DEFINITION

                interface Node { id: ID! }

                type User implements Node {
                  id: ID!
                  name: String @cost(weight: 2)
                }
            "#},
        );

    let definitions = Importer::new(provider).import("schema.graphql").await.unwrap();

    assert_eq!(names(&definitions), ["Query", "Node", "User", "cost"]);
}

#[tokio::test]
async fn extensions_are_folded_into_their_base_type() {
    let provider = MemoryProvider::new().with_document(
        "schema.graphql",
        indoc! {r#"
            type Query { a: A }
            type A { x: Int }
            extend type A { y: Int }
        "#},
    );

    let sdl = Importer::new(provider)
        .import_and_merge("schema.graphql", &MergeConfig::default())
        .await
        .unwrap();

    insta::assert_snapshot!(sdl, @r"
    type Query {
        a: A
    }

    type A {
        x: Int
        y: Int
    }

    schema {
        query: Query
    }
    ");
}

#[tokio::test]
async fn an_extension_of_an_imported_type_keeps_the_base() {
    let provider = MemoryProvider::new()
        .with_document(
            "schema.graphql",
            indoc! {r#"
                # import A from "a.graphql"
                extend type A { y: Int }
            "#},
        )
        .with_document("a.graphql", "type A { x: Int }");

    let sdl = Importer::new(provider)
        .import_and_merge("schema.graphql", &MergeConfig::default())
        .await
        .unwrap();

    assert_eq!(sdl, "type A {\n    y: Int\n    x: Int\n}\n");
}

#[tokio::test]
async fn selections_of_nested_imports_are_checked() {
    let provider = MemoryProvider::new()
        .with_document(
            "schema.graphql",
            indoc! {r#"
                # import A from "a.graphql"
                type Query { a: A }
            "#},
        )
        .with_document(
            "a.graphql",
            indoc! {r#"
                # import Z from "z.graphql"
                type A { id: ID }
            "#},
        )
        .with_document("z.graphql", "type Z { broken: Missing }");

    let error = Importer::new(provider).import("schema.graphql").await.unwrap_err();

    assert_eq!(
        error.to_string(),
        "Field broken: Couldn't find type Missing in any of the schemas."
    );
}

#[tokio::test]
async fn missing_documents_abort_the_import() {
    let provider = MemoryProvider::new().with_document("schema.graphql", "# import A from \"a.graphql\"");

    let error = Importer::new(provider).import("schema.graphql").await.unwrap_err();

    assert!(matches!(error, Error::Fetch(FetchError::NotFound { ref location }) if location == "a.graphql"));
}

#[tokio::test]
async fn malformed_import_lines_are_reported() {
    let provider = MemoryProvider::new().with_document("schema.graphql", "# import A frm \"a.graphql\"\ntype A { a: Int }");

    let error = Importer::new(provider).import("schema.graphql").await.unwrap_err();

    assert_eq!(
        error.to_string(),
        "Invalid import directive `import A frm \"a.graphql\"`: expected `import <selectors> from \"<path>\"`"
    );
}

#[tokio::test]
async fn parse_errors_name_the_document() {
    let provider = MemoryProvider::new()
        .with_document("schema.graphql", "# import A from \"a.graphql\"")
        .with_document("a.graphql", "type A {");

    let error = Importer::new(provider).import("schema.graphql").await.unwrap_err();

    assert!(matches!(error, Error::Parse { ref location, .. } if location == "a.graphql"));
}

#[tokio::test]
async fn import_from_an_already_parsed_root() {
    let provider = MemoryProvider::new().with_document("b.graphql", "type B { id: ID }");

    let root = Document::parse("a.graphql", "# import B from \"b.graphql\"\ntype A { b: B }").unwrap();

    let definitions = Importer::new(provider).import_document(root).await.unwrap();

    assert_eq!(names(&definitions), ["A", "B"]);
}

/// Serves generated documents and records how many fetches run at the same time.
#[derive(Default)]
struct CountingProvider {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    fetches: AtomicUsize,
}

#[async_trait::async_trait]
impl DocumentProvider for CountingProvider {
    async fn fetch(&self, location: &str, _importer: &str) -> Result<String, FetchError> {
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);
        self.fetches.fetch_add(1, Ordering::SeqCst);

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let name = location.trim_end_matches(".graphql").to_uppercase();

        Ok(format!("type {name} {{ id: ID }}"))
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn fetches_respect_the_concurrency_limit() {
    let root = Document::parse(
        "root.graphql",
        indoc! {r#"
            # import A from "a.graphql"
            # import B from "b.graphql"
            # import C from "c.graphql"
            # import D from "d.graphql"
            # import E from "e.graphql"
            type Query { a: A b: B c: C d: D e: E }
        "#},
    )
    .unwrap();

    let provider = CountingProvider::default();
    let importer = Importer::new(&provider).with_config(ImportConfig { concurrency_limit: 2 });

    let definitions = importer.import_document(root).await.unwrap();

    assert_eq!(names(&definitions), ["Query", "A", "B", "C", "D", "E"]);
    assert_eq!(provider.fetches.load(Ordering::SeqCst), 5);
    assert!(provider.max_in_flight.load(Ordering::SeqCst) <= 2);
}

#[tokio::test]
async fn import_and_merge_renders_sdl() {
    let provider = MemoryProvider::new()
        .with_document(
            "schema.graphql",
            indoc! {r#"
                # import Query.*, Comment from "comments.graphql"
                # import Query.*, Post from "posts.graphql"
            "#},
        )
        .with_document(
            "comments.graphql",
            indoc! {r#"
                type Query { comments: [Comment!]! }
                type Comment { id: ID! text: String }
            "#},
        )
        .with_document(
            "posts.graphql",
            indoc! {r#"
                type Query { posts: [Post!]! }
                type Post { id: ID! comments: [Comment] }
                type Comment { id: ID! }
            "#},
        );

    let sdl = Importer::new(provider)
        .import_and_merge("schema.graphql", &MergeConfig::default())
        .await
        .unwrap();

    insta::assert_snapshot!(sdl, @r"
    type Query {
        comments: [Comment!]!
        posts: [Post!]!
    }

    type Comment {
        id: ID!
        text: String
    }

    type Post {
        id: ID!
        comments: [Comment]
    }

    schema {
        query: Query
    }
    ");
}
