// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Page templates

use minijinja::Environment;

pub const BASE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{% block title %}{% endblock %} - Folio</title>
    <style>
        :root {
            --bg-primary: #0b0b12;
            --bg-secondary: #13131f;
            --bg-card: #1b1b2b;
            --text-primary: #e8e8e8;
            --text-secondary: #a0a0a0;
            --accent: #7c5cff;
            --accent-hover: #9d85ff;
            --warning: #ffaa00;
            --border: #2a2a4a;
        }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
            line-height: 1.6;
        }
        .container { max-width: 1200px; margin: 0 auto; padding: 20px; }
        nav {
            background: var(--bg-secondary);
            padding: 15px 20px;
            display: flex;
            align-items: center;
            gap: 30px;
            border-bottom: 1px solid var(--border);
        }
        nav .logo { font-size: 1.5em; font-weight: bold; color: var(--accent); text-decoration: none; }
        nav a { color: var(--text-secondary); text-decoration: none; }
        nav a:hover { color: var(--text-primary); }
        .card { background: var(--bg-card); border-radius: 12px; padding: 20px; margin-bottom: 20px; }
        .card h2 { margin-bottom: 15px; color: var(--accent); }
        .project-header { margin-bottom: 20px; }
        .project-header p { color: var(--text-secondary); }
        .btn {
            display: inline-block;
            margin-top: 10px;
            padding: 8px 16px;
            border-radius: 8px;
            background: var(--accent);
            color: white;
            text-decoration: none;
        }
        .btn:hover { background: var(--accent-hover); }
        .tabs { display: flex; gap: 8px; margin-bottom: 10px; }
        .tab-btn {
            padding: 6px 14px;
            border-radius: 6px;
            border: 1px solid var(--border);
            background: none;
            color: var(--text-secondary);
            font: inherit;
            cursor: pointer;
        }
        .tab-btn.active { background: var(--accent); color: white; border-color: var(--accent); }
        #codeViewer {
            width: 100%;
            min-height: 420px;
            background: var(--bg-secondary);
            color: var(--text-primary);
            border: 1px solid var(--border);
            border-radius: 8px;
            padding: 12px;
            font-family: 'JetBrains Mono', 'Fira Code', monospace;
            font-size: 0.9em;
        }
        #readmeContent pre {
            background: var(--bg-secondary);
            padding: 12px;
            border-radius: 8px;
            overflow-x: auto;
        }
        .warning {
            color: var(--warning);
            padding: 1rem;
            border: 1px solid var(--warning);
            border-radius: 8px;
            background: rgba(255, 170, 0, 0.1);
        }
        .error { color: #ff5c5c; }
        ul.projects { list-style: none; }
        ul.projects li { padding: 8px 0; border-bottom: 1px solid var(--border); }
        ul.projects a { color: var(--text-primary); }
        footer { text-align: center; color: var(--text-secondary); padding: 20px; }
    </style>
</head>
<body>
    <nav>
        <a href="/" class="logo">Folio</a>
        <a href="/">Projects</a>
    </nav>
    <main class="container">
        {% block content %}{% endblock %}
    </main>
    <footer>&copy; <span id="y">{{ year }}</span></footer>
</body>
</html>"#;

pub const INDEX: &str = r#"{% extends "base.html" %}
{% block title %}Projects{% endblock %}
{% block content %}
<h1>Projects</h1>
<div class="card">
    {% if projects %}
    <ul class="projects">
        {% for project in projects %}
        <li><a href="{{ project.href }}">{{ project.name }}</a></li>
        {% endfor %}
    </ul>
    {% else %}
    <p>No projects found under {{ base_dir }}/</p>
    {% endif %}
</div>
{% endblock %}"#;

pub const PROJECT: &str = r#"{% extends "base.html" %}
{% block title %}{{ title }}{% endblock %}
{% block content %}
<div class="project-header">
    <h1 id="projectTitle">{{ title }}</h1>
    <p id="projectDesc">{{ description }}</p>
    <a id="demoBtn" class="btn" href="{{ demo_link }}">View Demo</a>
</div>
<div class="card">
    <div class="tabs">
        {% for tab in tabs %}
        <button type="button" class="tab-btn{% if tab.active %} active{% endif %}" data-tab="{{ tab.key }}">{{ tab.label }}</button>
        {% endfor %}
    </div>
    <textarea id="codeViewer" readonly spellcheck="false">{{ code }}</textarea>
    {% for tab in tabs %}
    <template data-tab="{{ tab.key }}">{{ tab.content }}</template>
    {% endfor %}
</div>
<div class="card">
    <h2>README</h2>
    <div id="readmeContent">{{ documentation | safe }}</div>
</div>
<script>
    // Tab contents are rendered into the page once; switching only swaps the pane.
    document.querySelectorAll('.tab-btn').forEach((btn) => {
        btn.addEventListener('click', () => {
            const stored = document.querySelector('template[data-tab="' + btn.dataset.tab + '"]');
            const text = stored ? stored.content.textContent : '';
            if (!text) return;
            document.getElementById('codeViewer').value = text;
            document.querySelectorAll('.tab-btn').forEach((b) => b.classList.toggle('active', b === btn));
        });
    });
</script>
{% endblock %}"#;

/// Environment with all page templates registered
pub fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    for (name, source) in [("base.html", BASE), ("index.html", INDEX), ("project.html", PROJECT)] {
        if let Err(e) = env.add_template(name, source) {
            tracing::error!("Invalid template {}: {}", name, e);
        }
    }
    env
}
