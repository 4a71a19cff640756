/// Input for creating a store. Identifiers arrive as caller strings and
/// are parsed by the service.
#[derive(Debug, Clone)]
pub struct CreateStoreDto {
    pub name: String,
    pub description: String,
    pub category_id: String,
    pub external_id: String,
    pub tags: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
}
