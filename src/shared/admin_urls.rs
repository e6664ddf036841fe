//! Admin URL builders used for redirect targets.

pub fn script_index(brand_id: i64) -> String {
    format!("/admin/brands/{}/creator-scripts", brand_id)
}

pub fn script_create(brand_id: i64) -> String {
    format!("/admin/brands/{}/creator-scripts/create", brand_id)
}

pub fn script_edit(brand_id: i64, script_id: i64) -> String {
    format!("/admin/brands/{}/creator-scripts/{}/edit", brand_id, script_id)
}
