#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use clap::Parser;
use eframe::egui;
use egui_wol::app::EguiWol;
use egui_wol::config::Cli;
use egui_wol::logging::init_logging;
use tr::{tr, tr_init};

fn main() -> eframe::Result {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    tr_init!("./locales");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(tr!("egui wol"))
            .with_inner_size([720.0, 480.0])
            .with_resizable(true),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "egui_wol",
        options,
        Box::new(move |cc| Ok(Box::new(EguiWol::new(cc, &cli)?))),
    )
}
