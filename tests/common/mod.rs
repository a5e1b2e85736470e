#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

pub mod project {
    use page_creator::config::{Project, ProjectConfig};
    use page_creator::dispatcher::Dispatcher;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// umi config with a typed, wrapped route table and a comment after the last entry
    pub const UMI_CONFIG: &str = "import { defineConfig } from 'umi';

export default defineConfig({
  hash: true,
  antd: {},
  routes: [
    { path: '/', component: './index', exact: true },
    { path: '/users', component: './users', exact: true }, // keep
  ],
});
";

    /// A throwaway umi application: `config/config.ts` plus an empty pages root
    pub struct TestProject {
        pub dir: TempDir,
    }

    impl TestProject {
        pub fn new() -> Self {
            Self::with_route_config(UMI_CONFIG)
        }

        pub fn with_route_config(contents: &str) -> Self {
            let dir = tempfile::tempdir().unwrap();
            fs::create_dir_all(dir.path().join("config")).unwrap();
            fs::create_dir_all(dir.path().join("src/pages")).unwrap();
            fs::write(dir.path().join("config/config.ts"), contents).unwrap();
            TestProject { dir }
        }

        pub fn root(&self) -> &Path {
            self.dir.path()
        }

        pub fn path(&self, rel: &str) -> PathBuf {
            self.dir.path().join(rel)
        }

        pub fn read(&self, rel: &str) -> String {
            fs::read_to_string(self.path(rel)).unwrap()
        }

        pub fn route_config(&self) -> String {
            self.read("config/config.ts")
        }

        pub fn dispatcher(&self) -> Dispatcher {
            self.dispatcher_with(ProjectConfig::default())
        }

        pub fn dispatcher_with(&self, config: ProjectConfig) -> Dispatcher {
            Dispatcher::new(Project::new(self.root(), config))
        }

        /// Every file under the pages root, relative to it, sorted
        pub fn page_files(&self) -> Vec<String> {
            let root = self.path("src/pages");
            let mut out = Vec::new();
            collect(&root, &root, &mut out);
            out.sort();
            out
        }
    }

    fn collect(root: &Path, dir: &Path, out: &mut Vec<String>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries {
            let path = entry.unwrap().path();
            if path.is_dir() {
                collect(root, &path, out);
            } else {
                out.push(
                    path.strip_prefix(root)
                        .unwrap()
                        .to_string_lossy()
                        .replace('\\', "/"),
                );
            }
        }
    }
}

pub mod payloads {
    use page_creator::spec::Action;
    use serde_json::{json, Value};

    pub fn order_fields() -> Value {
        json!([
            {"type": "input", "label": "Customer", "name": "customer", "required": true},
            {"type": "select", "label": "Status", "name": "status",
             "options": [{"label": "Open", "value": "open"}, {"label": "Closed", "value": "closed"}]},
            {"type": "date", "label": "Due", "name": "dueDate"}
        ])
    }

    pub fn action(name: &str, payload: Value) -> Action {
        Action {
            action_type: format!("org.umi-plugin-page-creator.{}", name),
            payload,
        }
    }
}
