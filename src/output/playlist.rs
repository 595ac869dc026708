//! M3U playlist (`playlist.m3u`)

use super::stream_link;
use crate::config::OutputConfig;
use crate::models::ExtractedAsset;

pub fn project_playlist(assets: &[ExtractedAsset], config: &OutputConfig) -> String {
    let mut m3u = String::from("#EXTM3U\n");

    for asset in assets {
        let mut extinf = String::from("#EXTINF:-1");
        extinf.push_str(&format!(" tvg-id=\"{}\"", asset.dai_asset_key));
        extinf.push_str(&format!(" tvg-name=\"{}\"", asset.title));
        extinf.push_str(&format!(" tvg-logo=\"{}\"", asset.tv_background_image));
        extinf.push_str(&format!(" group-title=\"{}\"", config.group_title));
        extinf.push_str(&format!(",{}\n", asset.display_name()));

        m3u.push_str(&extinf);
        m3u.push_str(&format!(
            "{}\n",
            stream_link(&config.link_template, &asset.dai_asset_key)
        ));
    }

    m3u
}
