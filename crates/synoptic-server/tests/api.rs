//! Endpoint tests against an in-memory registry, driven through the router
//! with `tower::ServiceExt::oneshot`.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use synoptic_config::OrganRegistry;
use synoptic_model::{
    ChoiceOption, FieldDef, FieldKind, HistologySubtype, HistologyType, OrganConfig, Section,
    StageTable,
};
use synoptic_server::{AppContext, build_router};

fn field(name: &str, kind: FieldKind) -> FieldDef {
    FieldDef {
        name: name.to_string(),
        label: None,
        kind,
    }
}

fn lung_config() -> OrganConfig {
    OrganConfig {
        organ: "lung".to_string(),
        display_name: "Lung".to_string(),
        version: "8th edition".to_string(),
        sections: vec![
            Section {
                id: "tnm".to_string(),
                label: Some("TNM".to_string()),
                fields: vec![
                    field("pT", FieldKind::Radio { options: Vec::new() }),
                    field("pN", FieldKind::Radio { options: Vec::new() }),
                    field("pM", FieldKind::Radio { options: Vec::new() }),
                ],
            },
            Section {
                id: "findings".to_string(),
                label: Some("Findings".to_string()),
                fields: vec![
                    field(
                        "margins",
                        FieldKind::MultiCheckbox {
                            options: vec![
                                ChoiceOption {
                                    code: "R0".to_string(),
                                    label: "R0".to_string(),
                                },
                                ChoiceOption {
                                    code: "R1".to_string(),
                                    label: "R1".to_string(),
                                },
                            ],
                        },
                    ),
                    field(
                        "histologic_mix",
                        FieldKind::HistologicMix {
                            rows: 4,
                            types: vec![HistologyType {
                                code: "AD".to_string(),
                                label: "Adenocarcinoma".to_string(),
                                subtypes: vec![HistologySubtype {
                                    code: "AD_lepidic".to_string(),
                                    label: "lepidic".to_string(),
                                }],
                            }],
                        },
                    ),
                    field(
                        "nodal_stations",
                        FieldKind::NodalStations {
                            stations: vec![ChoiceOption {
                                code: "LN1R".to_string(),
                                label: "1R".to_string(),
                            }],
                        },
                    ),
                ],
            },
        ],
        template: "lung_report.txt".to_string(),
        stage_table: StageTable::from_entries(vec![
            ("T1a,N0,M0".to_string(), "Stage IA1".to_string()),
            ("T*,N*,M1c*".to_string(), "Stage IVB".to_string()),
        ]),
    }
}

fn test_router() -> Router {
    let registry = OrganRegistry::from_configs([lung_config()]).expect("registry");
    build_router(AppContext::new(registry), &std::env::temp_dir())
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn lists_registered_organs() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/api/organs")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json[0]["code"], "lung");
    assert_eq!(json[0]["label"], "Lung");
    assert_eq!(json[0]["version"], "8th edition");
}

#[tokio::test]
async fn organ_detail_returns_form_schema() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/api/organs/lung")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["organ"], "lung");
    assert_eq!(json["sections"][0]["id"], "tnm");
    assert_eq!(json["sections"][0]["fields"][0]["name"], "pT");
}

#[tokio::test]
async fn unknown_organ_is_a_distinct_not_found() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/api/organs/liver")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "UNKNOWN_ORGAN");
}

#[tokio::test]
async fn report_generation_round_trip() {
    let body = "pT=pT1a&pN=N0&pM=M0&margins=R0&margins=R1\
                &histologic_type_1=AD&histologic_subtype_1=AD_lepidic&histologic_percent_1=60\
                &LN1R_positive=2&LN1R_total=5";
    let response = test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/organs/lung/report")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["organ"], "lung");
    assert_eq!(json["context"]["stage"], "Stage IA1");
    assert_eq!(json["context"]["pT"], "pT1a");
    assert_eq!(
        json["context"]["margins"],
        serde_json::json!(["R0", "R1"])
    );
    assert_eq!(json["context"]["nodal_summary"], "1R (2/5)");

    let report_text = json["report_text"].as_str().expect("report text");
    assert!(report_text.contains("pStage: Stage IA1"));
    assert!(report_text.contains("Adenocarcinoma, lepidic (主 60%)"));
}

#[tokio::test]
async fn report_for_unknown_organ_is_not_found() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/organs/liver/report")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("pT=T1"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
