// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use minijinja::{default_auto_escape_callback, Environment, Value};

pub trait TemplateEngine: Send + Sync {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error>;
}

pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(default_auto_escape_callback);
        env.set_loader(embedded_template_loader);
        Self { env }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template_name)?;
        tmpl.render(context)
    }
}

/// Template loader for minijinja that loads from embedded sources
fn embedded_template_loader(name: &str) -> Result<Option<String>, minijinja::Error> {
    let template_content = match name {
        // Home page
        "index.html" => Some(include_str!("../public/templates/index.html")),

        // Error pages
        "error_404.html" => Some(include_str!("../public/templates/error_404.html")),
        "error_500.html" => Some(include_str!("../public/templates/error_500.html")),

        _ => None,
    };

    Ok(template_content.map(|s| s.to_string()))
}
