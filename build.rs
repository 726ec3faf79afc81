//! Build script to track include_str! dependencies.
//! This ensures cargo rebuilds when settings templates change.

fn main() {
    println!("cargo:rerun-if-changed=templates/file_databases.py");
    println!("cargo:rerun-if-changed=templates/refresh.py");
}
