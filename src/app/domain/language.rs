use serde::{Deserialize, Serialize};

/// Source languages offered in the language picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CodeLanguage {
    #[default]
    JavaScript,
    TypeScript,
    Python,
    Java,
    Cpp,
    CSharp,
    Html,
    Css,
    Sql,
    Json,
    Bash,
}

impl CodeLanguage {
    /// Stable identifier, also sent to the enhancement service as the language label.
    pub fn id(&self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Python => "python",
            Self::Java => "java",
            Self::Cpp => "cpp",
            Self::CSharp => "csharp",
            Self::Html => "html",
            Self::Css => "css",
            Self::Sql => "sql",
            Self::Json => "json",
            Self::Bash => "bash",
        }
    }

    /// Label shown in the language picker
    pub fn label(&self) -> &'static str {
        match self {
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
            Self::Python => "Python",
            Self::Java => "Java",
            Self::Cpp => "C++",
            Self::CSharp => "C#",
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::Sql => "SQL",
            Self::Json => "JSON",
            Self::Bash => "Bash",
        }
    }

    /// File extensions used to look up a grammar, tried in order.
    ///
    /// The bundled syntect grammars have no TypeScript definition, so
    /// TypeScript falls through to the JavaScript grammar.
    pub fn grammar_extensions(&self) -> &'static [&'static str] {
        match self {
            Self::JavaScript => &["js"],
            Self::TypeScript => &["ts", "js"],
            Self::Python => &["py"],
            Self::Java => &["java"],
            Self::Cpp => &["cpp", "cc"],
            Self::CSharp => &["cs"],
            Self::Html => &["html", "htm"],
            Self::Css => &["css"],
            Self::Sql => &["sql"],
            Self::Json => &["json"],
            Self::Bash => &["sh", "bash"],
        }
    }

    pub fn from_id(id: &str) -> Option<CodeLanguage> {
        Self::all().iter().copied().find(|lang| lang.id() == id)
    }

    /// All languages in picker order
    pub fn all() -> &'static [CodeLanguage] {
        &[
            Self::JavaScript,
            Self::TypeScript,
            Self::Python,
            Self::Java,
            Self::Cpp,
            Self::CSharp,
            Self::Html,
            Self::Css,
            Self::Sql,
            Self::Json,
            Self::Bash,
        ]
    }

    /// Position of this language in [`CodeLanguage::all`].
    pub fn index(&self) -> usize {
        Self::all()
            .iter()
            .position(|lang| lang == self)
            .unwrap_or(0)
    }
}
