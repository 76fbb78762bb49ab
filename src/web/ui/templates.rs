use askama::Template;
use askama_web::WebTemplate;

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub user_name: String,
    pub location_label: String,
    pub method_label: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "qibla.html")]
pub struct QiblaTemplate {}
