/// URL builders for the course REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseEndpoints {
    base_url: String,
}

impl CourseEndpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET`/`POST /courses`
    pub fn courses(&self) -> String {
        format!("{}/courses", self.base_url)
    }

    /// `GET /courses/paginated?page={page}&per_page={per_page}`
    pub fn paginated(&self, page: u32, per_page: u32) -> String {
        format!("{}/courses/paginated?page={}&per_page={}", self.base_url, page, per_page)
    }

    /// `GET`/`PUT`/`DELETE /courses/{id}`
    pub fn course(&self, id: i64) -> String {
        format!("{}/courses/{}", self.base_url, id)
    }
}
