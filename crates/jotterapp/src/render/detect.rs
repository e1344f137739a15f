//! Guessing the language of an unlabeled code block.
//!
//! Each candidate language has a handful of marker substrings. A block scores
//! one point per distinct marker it contains and the best score wins. Equal
//! scores go to the longer total of matched markers, then to the earlier
//! entry. A single marker is enough, so one-liners still get a language;
//! a block matching nothing gets `None`.

const MIN_SCORE: usize = 1;

struct Signature {
    /// Name used in the `language-*` class.
    label: &'static str,
    /// syntect lookup token.
    token: &'static str,
    markers: &'static [&'static str],
}

const SIGNATURES: &[Signature] = &[
    Signature {
        label: "rust",
        token: "rs",
        markers: &[
            "fn ", "let mut ", "impl ", "pub fn", "println!", "::", "-> ", "match ", "use std",
            "&self",
        ],
    },
    Signature {
        label: "python",
        token: "py",
        markers: &[
            "def ", "import ", "self.", "elif ", "print(", "None", "__init__", "True", "False",
            " = ",
        ],
    },
    Signature {
        label: "javascript",
        token: "js",
        markers: &[
            "function ", "const ", "=> ", "console.log", "===", "let ", "require(", "export ",
            "undefined",
        ],
    },
    Signature {
        label: "go",
        token: "go",
        markers: &["func ", "package ", ":= ", "fmt.", "import (", "go func"],
    },
    Signature {
        label: "c",
        token: "c",
        markers: &["#include", "int main", "printf(", "malloc(", "sizeof(", "NULL"],
    },
    Signature {
        label: "java",
        token: "java",
        markers: &[
            "public class",
            "public static void",
            "System.out",
            "private ",
            "@Override",
            "import java",
        ],
    },
    Signature {
        label: "ruby",
        token: "rb",
        markers: &["puts ", "require '", "do |", "elsif ", "attr_accessor", ".each "],
    },
    Signature {
        label: "bash",
        token: "sh",
        markers: &["#!/bin", "echo ", "$(", "fi\n", "; then", "done\n", "esac"],
    },
    Signature {
        label: "sql",
        token: "sql",
        markers: &[
            "SELECT ",
            "FROM ",
            "WHERE ",
            "INSERT INTO",
            "CREATE TABLE",
            "JOIN ",
            "GROUP BY",
        ],
    },
    Signature {
        label: "html",
        token: "html",
        markers: &["<html", "<div", "</", "<body", "<!DOCTYPE", "<head"],
    },
    Signature {
        label: "json",
        token: "json",
        markers: &["{\"", "\":", "\": ", "[{"],
    },
];

/// Returns `(label, syntect token)` for the best-scoring language.
pub fn guess_language(code: &str) -> Option<(&'static str, &'static str)> {
    let mut best: Option<(&Signature, (usize, usize))> = None;
    for signature in SIGNATURES {
        let matched: Vec<&str> = signature
            .markers
            .iter()
            .copied()
            .filter(|marker| code.contains(*marker))
            .collect();
        let score = (matched.len(), matched.iter().map(|m| m.len()).sum::<usize>());
        if score.0 >= MIN_SCORE && best.map_or(true, |(_, s)| score > s) {
            best = Some((signature, score));
        }
    }
    best.map(|(signature, _)| (signature.label, signature.token))
}

/// Maps common fence labels onto tokens the bundled syntaxes understand.
pub fn alias(lang: &str) -> &str {
    match lang {
        "typescript" | "ts" | "tsx" | "jsx" | "javascript" | "node" | "mjs" => "js",
        "shell" | "bash" | "zsh" | "console" | "shellscript" => "sh",
        "rust" => "rs",
        "python" | "python3" | "py3" => "py",
        "golang" => "go",
        "c++" | "cxx" => "cpp",
        "ruby" => "rb",
        "yml" => "yaml",
        "markdown" => "md",
        "text" | "plaintext" | "plain" => "txt",
        other => other,
    }
}
