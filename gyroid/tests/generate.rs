use gyroid::{
    Error, Face, GenerationParameters, Mesh, MeshFormat, Settings, ThreadPool,
    Trim, Variant, mesh::read_stl_triangle_count,
};
use nalgebra::Vector3;
use std::{collections::HashSet, fs::File, io::BufReader};
use strum::IntoEnumIterator;

fn radial(resolution: usize) -> GenerationParameters {
    GenerationParameters {
        resolution,
        a: 24.0,
        b: 24.0,
        c: 10.0,
        r1: 12.0,
        r2: 0.0,
        phi_scale: 8.0,
        cell_radius: 2.0,
        cell_height: 3.0,
        variant: Variant::Radial,
        ..Default::default()
    }
}

fn cube(resolution: usize) -> GenerationParameters {
    GenerationParameters {
        resolution,
        a: 10.0,
        b: 10.0,
        c: 10.0,
        density: 1.0,
        variant: Variant::Cartesian,
        trim: Trim::None,
        ..Default::default()
    }
}

#[test]
fn radial_lattice() {
    let mesh = gyroid::generate(&radial(20)).unwrap();
    assert!(!mesh.is_empty());
    assert!(mesh.is_valid());

    // Vertices stay inside the trim band (up to chord error)
    for v in &mesh.vertices {
        let r = v.xy().norm();
        assert!(r <= 12.0 + 1e-3, "{r}");
        assert!(r >= 0.5 * 0.9, "{r}");
    }
}

#[test]
fn faces_are_valid() {
    for variant in Variant::iter() {
        for trim in Trim::iter() {
            for caps in [false, true] {
                let params = GenerationParameters {
                    resolution: 12,
                    variant,
                    trim,
                    caps,
                    ..Default::default()
                };
                let mesh = gyroid::generate(&params).unwrap();
                assert!(mesh.is_valid(), "{variant} {trim} {caps}");
            }
        }
    }
}

#[test]
fn coincident_radii() {
    let params = GenerationParameters {
        resolution: 10,
        r1: 5.0,
        r2: 5.0,
        ..radial(10)
    };
    let mesh = gyroid::generate(&params).unwrap();
    // Chords between neighbouring angular samples dip inside the cylinder
    let chord = (std::f32::consts::PI / 9.0).cos();
    for v in &mesh.vertices {
        let r = v.xy().norm();
        assert!(r <= 5.0 + 1e-3 && r >= 5.0 * chord - 1e-3, "{r}");
    }
}

#[test]
fn resolution_increases_detail() {
    let lo = gyroid::generate(&cube(10)).unwrap();
    let hi = gyroid::generate(&cube(20)).unwrap();
    assert!(!lo.is_empty());
    assert!(hi.vertices.len() > lo.vertices.len());
    assert!(hi.faces.len() > lo.faces.len());
}

#[test]
fn zero_width_band_is_empty() {
    let params = GenerationParameters {
        wall_thickness: 0.0,
        trim: Trim::Band,
        ..radial(16)
    };
    let mesh = gyroid::generate(&params).unwrap();
    assert!(mesh.is_empty());
}

/// Largest distance from a screw-transformed vertex to its nearest neighbour
///
/// Each vertex is rotated a quarter turn about z, shifted a quarter period
/// along each axis, then wrapped back into the `[0, period)` block.
fn screw_mismatch(vertices: &[Vector3<f32>], period: f32) -> f32 {
    let q = period / 4.0;
    vertices
        .iter()
        .map(|v| {
            let t = Vector3::new(-v.y - q, v.x + q, v.z - q)
                .map(|c| c.rem_euclid(period));
            vertices
                .iter()
                .map(|w| (w - t).norm())
                .fold(f32::INFINITY, f32::min)
        })
        .fold(0.0, f32::max)
}

#[test]
fn screw_symmetry() {
    // The gyroid maps onto itself under a quarter turn about z combined with
    // a quarter-period shift along each axis, so every transformed vertex
    // lands near some other vertex of the mesh.
    let params = cube(10);
    let mesh = gyroid::generate(&params).unwrap();
    assert!(!mesh.is_empty());

    let h = params.a / (params.resolution - 1) as f32;
    let err = screw_mismatch(&mesh.vertices, params.a);
    assert!(err <= h, "{err} > {h}");

    // Half a lattice is not symmetric
    let half: Vec<_> =
        mesh.vertices.iter().filter(|v| v.x < 3.0).copied().collect();
    assert!(!half.is_empty());
    let err = screw_mismatch(&half, params.a);
    assert!(err > 3.0 * h, "{err}");
}

#[test]
fn diamond_vertices_are_distinct() {
    // Crossings that land within rounding of a node must share its vertex
    let params = GenerationParameters {
        variant: Variant::Diamond,
        ..cube(21)
    };
    let mesh = gyroid::generate(&params).unwrap();
    assert!(!mesh.is_empty());
    assert!(mesh.is_valid());

    let mut seen = HashSet::new();
    for v in &mesh.vertices {
        let key = v.map(f32::to_bits);
        assert!(seen.insert((key.x, key.y, key.z)), "duplicate vertex {v:?}");
    }
    for f in &mesh.faces {
        if let &Face::Triangle([a, b, c]) = f {
            let (a, b, c) =
                (mesh.vertices[a], mesh.vertices[b], mesh.vertices[c]);
            let area = (b - a).cross(&(c - a)).norm();
            assert!(area > 0.0, "degenerate face {f:?}");
        }
    }
}

#[test]
fn arc_count_lattice() {
    for variant in Variant::iter() {
        let params = GenerationParameters {
            resolution: 16,
            variant,
            arc_count: Some(3),
            ..Default::default()
        };
        let mesh = gyroid::generate(&params).unwrap();
        assert!(!mesh.is_empty(), "{variant}");
        assert!(mesh.is_valid(), "{variant}");
    }

    let params = GenerationParameters {
        arc_count: Some(0),
        ..cube(8)
    };
    let e = gyroid::generate(&params).unwrap_err();
    assert!(matches!(e, Error::BadArcCount(0)), "{e}");
}

#[test]
fn obj_round_trip() {
    let mesh = gyroid::generate(&radial(16)).unwrap();
    assert!(mesh.quad_count() > 0);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lattice.obj");
    gyroid::export(&mesh, &path, MeshFormat::Obj).unwrap();

    let f = BufReader::new(File::open(&path).unwrap());
    let read = Mesh::read_obj(f).unwrap();
    assert_eq!(read.vertices.len(), mesh.vertices.len());
    assert_eq!(read.faces, mesh.faces);
    assert_eq!(read.vertices, mesh.vertices);
}

#[test]
fn stl_triangle_counts() {
    let mesh = gyroid::generate(&radial(16)).unwrap();
    let tris = mesh.faces.len() - mesh.quad_count();
    let expected = 2 * mesh.quad_count() + tris;
    assert_eq!(mesh.triangle_count(), expected);

    let dir = tempfile::tempdir().unwrap();
    for (name, format) in
        [("a.stl", MeshFormat::Stl), ("b.stl", MeshFormat::StlAscii)]
    {
        let path = dir.path().join(name);
        gyroid::export(&mesh, &path, format).unwrap();
        assert_eq!(MeshFormat::from_path(&path).unwrap(), MeshFormat::Stl);
        let n = read_stl_triangle_count(File::open(&path).unwrap()).unwrap();
        assert_eq!(n, expected, "{format}");
    }
}

#[test]
fn configuration_errors() {
    let params = GenerationParameters {
        resolution: 1,
        ..Default::default()
    };
    let e = gyroid::generate(&params).unwrap_err();
    assert!(matches!(e, Error::BadResolution(1)));
    assert!(e.is_configuration());

    let params = GenerationParameters {
        a: 0.0,
        ..cube(8)
    };
    let e = gyroid::generate(&params).unwrap_err();
    assert!(matches!(e, Error::BadExtent("a", _)), "{e}");
}

#[test]
fn export_to_missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.stl");
    let e = gyroid::export(&Mesh::new(), &path, MeshFormat::Stl).unwrap_err();
    assert!(matches!(e, Error::Io(..)));
    assert!(!e.is_configuration());
}

#[test]
fn empty_mesh_exports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.stl");
    gyroid::export(&Mesh::new(), &path, MeshFormat::Stl).unwrap();
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 84);
}

#[test]
fn thread_pool_matches_serial() {
    let pool = ThreadPool::Custom(
        rayon::ThreadPoolBuilder::new()
            .num_threads(3)
            .build()
            .unwrap(),
    );
    for params in [radial(18), cube(14)] {
        let a = gyroid::generate(&params).unwrap();
        let b =
            gyroid::generate_with(&params, &Settings::with_threads(&pool))
                .unwrap();
        assert_eq!(a.vertices, b.vertices);
        assert_eq!(a.faces, b.faces);

        let c = gyroid::generate_with(&params, &Settings {
            threads: Some(&ThreadPool::Global),
        })
        .unwrap();
        assert_eq!(a.faces, c.faces);
    }
}

#[test]
fn sheet_thickening() {
    let solid = gyroid::generate(&cube(14)).unwrap();
    let sheet = gyroid::generate(&GenerationParameters {
        sheet_thickness: Some(0.3),
        ..cube(14)
    })
    .unwrap();
    assert!(sheet.is_valid());
    // A sheet has two sides
    assert!(sheet.faces.len() > solid.faces.len());
}
