use crate::models::{ChartForm, ChartStyle, Granularity};

/// The chart form page: symbol list, optional error, optional chart
pub struct Page<'a> {
    pub symbols: &'a [String],
    pub error: Option<String>,
    pub chart_url: Option<String>,
    pub form: &'a ChartForm,
}

impl<'a> Page<'a> {
    /// Create an empty page listing the symbols
    pub fn new(symbols: &'a [String], form: &'a ChartForm) -> Self {
        Page {
            symbols,
            error: None,
            chart_url: None,
            form,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_chart(mut self, url: impl Into<String>) -> Self {
        self.chart_url = Some(url.into());
        self
    }

    /// Render the page as a complete HTML document
    pub fn render(&self) -> String {
        let mut output = String::from(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>Stock Data Visualizer</title>\n</head>\n<body>\n<h1>Stock Data Visualizer</h1>\n",
        );

        if let Some(error) = &self.error {
            output.push_str(&format!("<p class=\"error\">{}</p>\n", escape_html(error)));
        }

        output.push_str("<form method=\"post\" action=\"/\">\n");
        output.push_str(&self.render_symbol_select());
        output.push_str(&self.render_chart_type_select());
        output.push_str(&self.render_time_series_select());
        output.push_str(&render_date_input("start_date", "Start Date", self.form.start_date.as_deref()));
        output.push_str(&render_date_input("end_date", "End Date", self.form.end_date.as_deref()));
        output.push_str("<button type=\"submit\">Generate Chart</button>\n</form>\n");

        if let Some(url) = &self.chart_url {
            output.push_str(&format!(
                "<div class=\"chart\"><embed type=\"image/svg+xml\" src=\"{}\"></div>\n",
                escape_html(url)
            ));
        }

        output.push_str("</body>\n</html>\n");
        output
    }

    fn render_symbol_select(&self) -> String {
        let options: Vec<(&str, &str)> = self.symbols.iter().map(|s| (s.as_str(), s.as_str())).collect();
        render_select("symbol", "Symbol", &options, self.form.symbol.as_deref())
    }

    fn render_chart_type_select(&self) -> String {
        let options = [
            (ChartStyle::Line.tag(), "Line"),
            (ChartStyle::Bar.tag(), "Bar"),
        ];
        render_select("chart_type", "Chart Type", &options, self.form.chart_type.as_deref())
    }

    fn render_time_series_select(&self) -> String {
        let options: Vec<(&str, &str)> = Granularity::ALL
            .iter()
            .map(|g| {
                let label = match g {
                    Granularity::Daily => "Daily",
                    Granularity::Weekly => "Weekly",
                    Granularity::Monthly => "Monthly",
                };
                (g.tag(), label)
            })
            .collect();
        render_select("time_series", "Time Series", &options, self.form.time_series.as_deref())
    }
}

fn render_select(name: &str, label: &str, options: &[(&str, &str)], selected: Option<&str>) -> String {
    let mut output = format!("<label for=\"{0}\">{1}</label>\n<select id=\"{0}\" name=\"{0}\">\n", name, label);
    for (value, text) in options {
        let marker = if selected == Some(*value) { " selected" } else { "" };
        output.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            escape_html(value),
            marker,
            escape_html(text)
        ));
    }
    output.push_str("</select>\n");
    output
}

fn render_date_input(name: &str, label: &str, value: Option<&str>) -> String {
    format!(
        "<label for=\"{0}\">{1}</label>\n<input type=\"date\" id=\"{0}\" name=\"{0}\" value=\"{2}\">\n",
        name,
        label,
        escape_html(value.unwrap_or_default())
    )
}

/// Escape text for use in HTML content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
