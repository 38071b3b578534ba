//! HTML views for the console
//!
//! Templates are compiled into the binary, so the console ships as a single
//! executable with no template directory to deploy. Template names keep the
//! `.html` extension so MiniJinja applies HTML auto-escaping.

use minijinja::Environment;
use serde::Serialize;

use crate::error::Result;

/// Exception index page shell
pub const EXCEPTION_INDEX: &str = "exception_index.html";
/// Exception list partial (rows plus paging metadata)
pub const EXCEPTION_LIST: &str = "exception_list.html";
/// Login page
pub const LOGIN: &str = "login.html";

#[derive(Clone)]
pub struct ViewEngine {
    env: Environment<'static>,
}

impl ViewEngine {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(EXCEPTION_INDEX, include_str!("templates/exception_index.html"))?;
        env.add_template(EXCEPTION_LIST, include_str!("templates/exception_list.html"))?;
        env.add_template(LOGIN, include_str!("templates/login.html"))?;
        Ok(Self { env })
    }

    /// Render the named template to HTML
    pub fn render<C: Serialize>(&self, name: &str, ctx: C) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(minijinja::Value::from_serialize(&ctx))?)
    }
}
