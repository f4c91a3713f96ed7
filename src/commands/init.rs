//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Penna;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("content/posts"))?;
    fs::create_dir_all(target_dir.join("content/pages"))?;

    let config_content = r#"# Site
title: Penna
author: ''
description: ''
default_locale: en

# URL
url: http://example.com
root: /

# Directory
content_dir: content
public_dir: public

# Rendering
highlight:
  theme: base16-ocean.dark

# Image pipeline
images:
  source_dir: content
  target_dir: public/images
  quality: 60
"#;
    fs::write(target_dir.join("_config.yml"), config_content)?;

    // Sample post
    let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    let sample_post = format!(
        r#"---
title: Hello World
datetime: {}
tags: [meta]
---

Welcome to your new site. Edit or delete this post under
`content/posts/hello-world/`, then rebuild.

## Quick start

```bash
penna new "My first post"
penna generate
penna serve
```
"#,
        now
    );
    fs::create_dir_all(target_dir.join("content/posts/hello-world"))?;
    fs::write(
        target_dir.join("content/posts/hello-world/en.md"),
        sample_post,
    )?;

    // The home page's content is shown above the post listing
    fs::create_dir_all(target_dir.join("content/pages/home"))?;
    fs::write(
        target_dir.join("content/pages/home/en.md"),
        "Words and pictures from a small studio.\n",
    )?;

    Ok(())
}

/// Run the init command against an existing site handle
pub fn run(site: &Penna) -> Result<()> {
    init_site(&site.base_dir)
}
