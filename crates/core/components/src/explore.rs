/// Button which scrolls the landing page down to the event list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreButton {
    pub id: String,
    pub class: String,
    pub label: String,
    /// In-page anchor to navigate to
    pub href: String,
    pub icon: String,
    pub icon_alt: String,
    pub icon_size: u32,
}

impl Default for ExploreButton {
    fn default() -> Self {
        Self {
            id: "explore-btn".to_string(),
            class: "mt-7 mx-auto".to_string(),
            label: "Explore".to_string(),
            href: "#events".to_string(),
            icon: "/icons/arrow-down.svg".to_string(),
            icon_alt: "arrow-down".to_string(),
            icon_size: 24,
        }
    }
}

impl ExploreButton {
    /// Render the button as an HTML fragment
    pub fn render(&self) -> String {
        let size = self.icon_size.to_string();

        [
            ("{{id}}", self.id.as_str()),
            ("{{class}}", self.class.as_str()),
            ("{{href}}", self.href.as_str()),
            ("{{label}}", self.label.as_str()),
            ("{{icon}}", self.icon.as_str()),
            ("{{icon_alt}}", self.icon_alt.as_str()),
            ("{{icon_size}}", size.as_str()),
        ]
        .into_iter()
        .fold(
            include_str!("../templates/explore_button.html").to_string(),
            |html, (placeholder, value)| html.replace(placeholder, &crate::escape_html(value)),
        )
    }

    /// Handle activation, returns where the page should navigate to
    pub fn on_click(&self) -> &str {
        debug!("clicked");
        &self.href
    }
}
