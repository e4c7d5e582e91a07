use sitewise::framer::TIME_COLUMN;
use sitewise::{
    AssetPropertyValueQuery, ColumnElementType, HttpSitewiseClient, PropertyDataType, QueryContext,
    QueryType, ResourceProvider, SitewiseClient, SitewiseConfig, SitewiseError,
    fetch_metadata_and_resolve, regional_resources_from_config, resolve_in_region,
    resources_from_config,
};

use mock_server::MockSitewiseServer;

fn config_for(server: &MockSitewiseServer) -> SitewiseConfig {
    sitewise::init_logging();
    SitewiseConfig {
        endpoint: server.base_url(),
        request_timeout_secs: 5,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_describe_asset() -> anyhow::Result<()> {
    let server = MockSitewiseServer::start().await;
    let client = HttpSitewiseClient::new(&config_for(&server))?;

    let asset = client.describe_asset("a1").await?;
    assert_eq!(asset.asset_name, "Demo Turbine Asset 1");
    assert_eq!(asset.asset_properties.len(), 2);
    assert_eq!(
        asset.property("running").map(|p| p.data_type.clone()),
        Some(PropertyDataType::Boolean)
    );
    assert_eq!(asset.asset_status.map(|s| s.state).as_deref(), Some("ACTIVE"));

    server.stop();
    Ok(())
}

#[tokio::test]
async fn test_describe_asset_property() -> anyhow::Result<()> {
    let server = MockSitewiseServer::start().await;
    let client = HttpSitewiseClient::new(&config_for(&server))?;

    let property = client.describe_asset_property("a1", "wind").await?;
    assert_eq!(property.asset_name, "Demo Turbine Asset 1");
    assert_eq!(property.asset_property.name, "Wind Speed");
    assert_eq!(property.asset_property.data_type, PropertyDataType::Double);

    server.stop();
    Ok(())
}

#[tokio::test]
async fn test_status_errors() -> anyhow::Result<()> {
    let server = MockSitewiseServer::start().await;
    let client = HttpSitewiseClient::new(&config_for(&server))?;

    let missing = client.describe_asset("nope").await;
    assert!(matches!(missing, Err(SitewiseError::NotFound { .. })));

    match client.describe_asset_property("a1", "boom").await {
        Err(SitewiseError::Http { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected HTTP error, got {other:?}"),
    }

    server.stop();
    Ok(())
}

#[tokio::test]
async fn test_resolve_through_configured_resources() -> anyhow::Result<()> {
    let server = MockSitewiseServer::start().await;
    let resources = resources_from_config(&config_for(&server))?;
    let ctx = QueryContext::new();

    let query = AssetPropertyValueQuery::new(QueryType::PropertyValueHistory, "a1", "running");
    let schema = fetch_metadata_and_resolve(&ctx, resources.clone(), &query).await?;
    assert_eq!(schema.column_names(), vec![TIME_COLUMN, "Running"]);
    assert_eq!(schema.columns()[1].element_type, ColumnElementType::Bool);

    let asset = resources.asset(&ctx, "a1").await?;
    assert_eq!(asset.asset_id, "a1");

    let query = AssetPropertyValueQuery::new(QueryType::PropertyValue, "a1", "gone");
    let result = fetch_metadata_and_resolve(&ctx, resources, &query).await;
    assert!(matches!(result, Err(SitewiseError::NotFound { .. })));

    server.stop();
    Ok(())
}

#[tokio::test]
async fn test_query_region_selects_endpoint() -> anyhow::Result<()> {
    let server = MockSitewiseServer::start().await;
    let config = SitewiseConfig {
        endpoint: format!("{}/{{region}}", server.base_url()),
        ..config_for(&server)
    };
    let regions = regional_resources_from_config(&config)?;
    let ctx = QueryContext::new();

    let query = AssetPropertyValueQuery::new(QueryType::PropertyValue, "a1", "wind");
    let schema = resolve_in_region(&ctx, &regions, &query).await?;
    assert_eq!(schema.column_names(), vec![TIME_COLUMN, "Wind Speed"]);

    let query = query.with_region("eu-west-1");
    let schema = resolve_in_region(&ctx, &regions, &query).await?;
    assert_eq!(schema.columns()[1].element_type, ColumnElementType::Float64);

    assert_eq!(
        server.requested_paths(),
        vec![
            "/us-east-1/assets/a1/properties/wind",
            "/eu-west-1/assets/a1/properties/wind",
        ]
    );
    assert_eq!(regions.regions().await, vec!["eu-west-1", "us-east-1"]);

    server.stop();
    Ok(())
}

#[tokio::test]
async fn test_ids_stay_within_their_path_segment() -> anyhow::Result<()> {
    let server = MockSitewiseServer::start().await;
    let client = HttpSitewiseClient::new(&config_for(&server))?;

    let result = client.describe_asset_property("a1/properties/wind?x=1#", "wind").await;
    assert!(matches!(result, Err(SitewiseError::NotFound { .. })));

    assert_eq!(
        server.requested_paths(),
        vec!["/assets/a1%2Fproperties%2Fwind%3Fx=1%23/properties/wind"]
    );

    server.stop();
    Ok(())
}
