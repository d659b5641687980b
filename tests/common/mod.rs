#![allow(dead_code)]

use std::fs::File;
use std::path::Path;

use walkdir::WalkDir;

/// Relative listing of a directory tree in archive naming: `/` separators,
/// directories with a trailing `/`, sorted.
pub fn tree_listing(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .map(|e| e.expect("walk entry"))
        .map(|e| {
            let rel = e.path().strip_prefix(root).expect("under root");
            let mut name = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            if e.file_type().is_dir() {
                name.push('/');
            }
            name
        })
        .collect();
    names.sort();
    names
}

/// Entry names of a zip archive, sorted.
pub fn archive_listing(archive: &Path) -> Vec<String> {
    let mut zip = zip::ZipArchive::new(File::open(archive).expect("open archive"))
        .expect("read archive");
    let mut names: Vec<String> = (0..zip.len())
        .map(|i| zip.by_index(i).expect("entry").name().to_string())
        .collect();
    names.sort();
    names
}

/// Build the small project tree used across tests:
///
/// ```text
/// project/
///   a.txt
///   sub/            (empty)
///   docs/readme.md
///   docs/img/logo.bin
/// ```
pub fn make_project(parent: &Path) -> std::path::PathBuf {
    let root = parent.join("project");
    std::fs::create_dir_all(root.join("sub")).expect("mkdir sub");
    std::fs::create_dir_all(root.join("docs/img")).expect("mkdir docs/img");
    std::fs::write(root.join("a.txt"), b"alpha").expect("write a.txt");
    std::fs::write(root.join("docs/readme.md"), b"# readme\n").expect("write readme");
    std::fs::write(root.join("docs/img/logo.bin"), [0u8, 159, 146, 150, 255]).expect("write logo");
    root
}
